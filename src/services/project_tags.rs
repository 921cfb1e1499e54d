//! Project tag endpoints.

use serde::Deserialize;

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::query::{QueryParams, QueryValue, ToQuery};
use crate::validate::{self, Checked};

/// A tag list that always encodes, even when empty.
///
/// `api/project_tags/set` distinguishes an absent `tags` parameter from an
/// empty one: `tags=` replaces the project's tags with nothing, clearing
/// them. Encoding is therefore supplied by the type itself instead of the
/// default omit-if-empty rule.
#[derive(Debug, Clone, Default)]
pub struct TagList(pub Vec<String>);

impl QueryValue for TagList {
    fn to_query_value(&self) -> Option<String> {
        Some(self.0.join(","))
    }
}

/// Options for `api/project_tags/search`.
#[derive(Debug, Clone, Default)]
pub struct SearchTagsOpts {
    /// Filter tags containing this text.
    pub q: Option<String>,
    /// Maximum number of tags to return (max 100).
    pub page_size: Option<u32>,
}

impl SearchTagsOpts {
    pub fn validate(&self) -> Checked {
        if let Some(page_size) = self.page_size {
            validate::in_range("ps", page_size, 1, 100)?;
        }
        Ok(())
    }
}

impl ToQuery for SearchTagsOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.opt_str("q", self.q.as_deref());
        query.opt("ps", self.page_size);
        query
    }
}

/// Options for `api/project_tags/set`.
#[derive(Debug, Clone, Default)]
pub struct SetProjectTagsOpts {
    /// Key of the project. Required.
    pub project: String,
    /// Replacement tag set. Empty clears all tags.
    pub tags: TagList,
}

impl SetProjectTagsOpts {
    pub fn validate(&self) -> Checked {
        validate::require("project", &self.project)
    }
}

impl ToQuery for SetProjectTagsOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("project", &self.project);
        query.custom("tags", &self.tags);
        query
    }
}

#[derive(Debug, Deserialize)]
struct SearchTagsResponse {
    tags: Vec<String>,
}

/// List tags used on projects.
#[tracing::instrument(skip(client))]
pub async fn search(client: &SonarClient, opts: &SearchTagsOpts) -> Result<Vec<String>> {
    opts.validate()?;
    let response = client
        .get("api/project_tags/search", &opts.to_query())
        .await?;
    let data: SearchTagsResponse = client::json(response).await?;
    Ok(data.tags)
}

/// Replace a project's tags. The server answers 204 on success.
#[tracing::instrument(skip(client))]
pub async fn set(client: &SonarClient, opts: &SetProjectTagsOpts) -> Result<()> {
    opts.validate()?;
    client
        .post("api/project_tags/set", &opts.to_query())
        .await?;
    Ok(())
}
