//! Project management endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::pagination::{Page, PageParams, Paging};
use crate::query::{QueryParams, ToQuery};
use crate::traits::Search;
use crate::validate::{self, Checked};

/// Allowed project visibilities.
pub const VISIBILITIES: &[&str] = &["public", "private"];

/// Allowed component qualifiers for project search.
pub const QUALIFIERS: &[&str] = &["TRK", "VW", "APP"];

/// Maximum length of a project name, in characters.
pub const MAX_NAME_LENGTH: usize = 500;

/// Maximum length of a project key, in characters.
pub const MAX_KEY_LENGTH: usize = 400;

/// A project known to the server.
///
/// Projects are the top-level containers for analyzed code; each analysis
/// replaces the project's current snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The project key (e.g. "org.example:my-app").
    pub key: String,

    /// The project display name.
    pub name: String,

    /// Component qualifier ("TRK" for projects).
    #[serde(default)]
    pub qualifier: Option<String>,

    /// "public" or "private".
    #[serde(default)]
    pub visibility: Option<String>,

    /// When the project was last analyzed.
    #[serde(default)]
    pub last_analysis_date: Option<String>,

    /// SCM revision of the last analysis.
    #[serde(default)]
    pub revision: Option<String>,
}

impl Project {
    /// Check if this project has been analyzed at least once.
    pub fn is_analyzed(&self) -> bool {
        self.last_analysis_date.is_some()
    }
}

/// Options for `api/projects/create`.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectOpts {
    /// Display name of the project. Required, at most 500 characters.
    pub name: String,
    /// Key of the project. Required, at most 400 characters.
    pub project: String,
    /// Project visibility ("public" or "private").
    pub visibility: Option<String>,
    /// Key of the main branch. Defaults server-side when absent.
    pub main_branch: Option<String>,
}

impl CreateProjectOpts {
    /// Check all field constraints. Runs before any request is built.
    pub fn validate(&self) -> Checked {
        validate::require("name", &self.name)?;
        validate::require("project", &self.project)?;
        validate::max_length("name", &self.name, MAX_NAME_LENGTH)?;
        validate::max_length("project", &self.project, MAX_KEY_LENGTH)?;
        if let Some(visibility) = &self.visibility {
            validate::one_of("visibility", visibility, VISIBILITIES)?;
        }
        Ok(())
    }
}

impl ToQuery for CreateProjectOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("name", &self.name);
        query.push("project", &self.project);
        query.opt_str("visibility", self.visibility.as_deref());
        query.opt_str("mainBranch", self.main_branch.as_deref());
        query
    }
}

/// Options for `api/projects/search`.
#[derive(Debug, Clone, Default)]
pub struct SearchProjectsOpts {
    /// Restrict to these project keys (comma-joined).
    pub projects: Vec<String>,
    /// Component qualifiers to include.
    pub qualifiers: Vec<String>,
    /// Only projects last analyzed before this date.
    pub analyzed_before: Option<String>,
    /// Only provisioned (never analyzed) projects.
    pub on_provisioned_only: Option<bool>,
    /// Free-text filter on key and name.
    pub q: Option<String>,
    /// Pagination.
    pub page: PageParams,
}

impl SearchProjectsOpts {
    pub fn validate(&self) -> Checked {
        validate::each_one_of("qualifiers", &self.qualifiers, QUALIFIERS)?;
        self.page.validate()?;
        Ok(())
    }
}

impl ToQuery for SearchProjectsOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.csv("projects", &self.projects);
        query.csv("qualifiers", &self.qualifiers);
        query.opt_str("analyzedBefore", self.analyzed_before.as_deref());
        query.opt("onProvisionedOnly", self.on_provisioned_only);
        query.opt_str("q", self.q.as_deref());
        self.page.apply(&mut query);
        query
    }
}

/// Options for `api/projects/delete`.
#[derive(Debug, Clone, Default)]
pub struct DeleteProjectOpts {
    /// Key of the project to delete. Required.
    pub project: String,
}

impl DeleteProjectOpts {
    pub fn validate(&self) -> Checked {
        validate::require("project", &self.project)?;
        validate::max_length("project", &self.project, MAX_KEY_LENGTH)?;
        Ok(())
    }
}

impl ToQuery for DeleteProjectOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("project", &self.project);
        query
    }
}

/// Options for `api/projects/update_visibility`.
#[derive(Debug, Clone, Default)]
pub struct UpdateVisibilityOpts {
    /// Key of the project. Required.
    pub project: String,
    /// New visibility, "public" or "private". Required.
    pub visibility: String,
}

impl UpdateVisibilityOpts {
    pub fn validate(&self) -> Checked {
        validate::require("project", &self.project)?;
        validate::require("visibility", &self.visibility)?;
        validate::one_of("visibility", &self.visibility, VISIBILITIES)?;
        Ok(())
    }
}

impl ToQuery for UpdateVisibilityOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("project", &self.project);
        query.push("visibility", &self.visibility);
        query
    }
}

#[derive(Debug, Deserialize)]
struct CreateProjectResponse {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct SearchProjectsResponse {
    paging: Paging,
    components: Vec<Project>,
}

/// Create a project.
///
/// # Errors
///
/// Returns a validation error before any I/O if the options are invalid,
/// or an API error if the server rejects the call (e.g. duplicate key).
#[tracing::instrument(skip(client))]
pub async fn create(client: &SonarClient, opts: &CreateProjectOpts) -> Result<Project> {
    opts.validate()?;
    let response = client.post("api/projects/create", &opts.to_query()).await?;
    let data: CreateProjectResponse = client::json(response).await?;
    Ok(data.project)
}

/// Search projects (single page, using the pagination in `opts`).
#[tracing::instrument(skip(client))]
pub async fn search(client: &SonarClient, opts: &SearchProjectsOpts) -> Result<Page<Project>> {
    opts.validate()?;
    let response = client.get("api/projects/search", &opts.to_query()).await?;
    let data: SearchProjectsResponse = client::json(response).await?;
    Ok(Page::from_paging(data.components, &data.paging))
}

/// Delete a project. The server answers 204 on success.
#[tracing::instrument(skip(client))]
pub async fn delete(client: &SonarClient, opts: &DeleteProjectOpts) -> Result<()> {
    opts.validate()?;
    client.post("api/projects/delete", &opts.to_query()).await?;
    Ok(())
}

/// Change a project's visibility. The server answers 204 on success.
#[tracing::instrument(skip(client))]
pub async fn update_visibility(client: &SonarClient, opts: &UpdateVisibilityOpts) -> Result<()> {
    opts.validate()?;
    client
        .post("api/projects/update_visibility", &opts.to_query())
        .await?;
    Ok(())
}

#[async_trait]
impl Search for Project {
    type Options = SearchProjectsOpts;

    async fn search_page(
        client: &SonarClient,
        options: &Self::Options,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Self>> {
        let mut opts = options.clone();
        opts.page = PageParams::for_page(page, page_size);
        search(client, &opts).await
    }
}
