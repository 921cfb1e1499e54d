//! Search trait for paginated list endpoints.

use async_trait::async_trait;

use crate::client::SonarClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for search operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// Search entities with pagination support.
///
/// Implement this trait for entity types whose search endpoint returns a
/// paged collection.
///
/// # Example
///
/// ```ignore
/// use sonarapi::{SonarClient, Rule, Search};
///
/// let client = SonarClient::from_env()?;
///
/// // Fetch a single page
/// let page = Rule::search_page(&client, &Default::default(), 1, 50).await?;
///
/// // Fetch all pages
/// let all_rules = Rule::search_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait Search: Sized + Send {
    /// Options for filtering.
    type Options: Default + Send + Sync;

    /// Search entities matching the options (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The SonarQube API client
    /// * `options` - Filter options
    /// * `page` - Page number (1-indexed)
    /// * `page_size` - Number of items per page (max 500)
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation or the request fails.
    async fn search_page(
        client: &SonarClient,
        options: &Self::Options,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Self>>;

    /// Search all entities matching the options (fetches all pages).
    ///
    /// This method automatically handles pagination, fetching pages
    /// until no more results are available.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn search_all(client: &SonarClient, options: &Self::Options) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::search_page(client, options, page, DEFAULT_PAGE_SIZE).await?;
            let items_count = result.items.len();
            all_items.extend(result.items);

            if !result.has_more || items_count < DEFAULT_PAGE_SIZE as usize {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(all_items)
    }
}
