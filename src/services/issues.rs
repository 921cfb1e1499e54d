//! Issue endpoints: searching, assigning, and tagging issues.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::pagination::{Page, PageParams, Paging};
use crate::query::{QueryParams, ToQuery};
use crate::services::rules::{SEVERITIES, TYPES};
use crate::traits::Search;
use crate::validate::{self, Checked};

/// Allowed issue workflow statuses.
pub const STATUSES: &[&str] = &["OPEN", "CONFIRMED", "REOPENED", "RESOLVED", "CLOSED"];

/// Allowed issue resolutions.
pub const RESOLUTIONS: &[&str] = &["FALSE-POSITIVE", "WONTFIX", "FIXED", "REMOVED"];

/// An issue raised by analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique issue key.
    pub key: String,

    /// Key of the rule that raised the issue.
    pub rule: String,

    /// Issue severity.
    #[serde(default)]
    pub severity: Option<String>,

    /// Key of the component the issue was raised on.
    #[serde(default)]
    pub component: Option<String>,

    /// Key of the enclosing project.
    #[serde(default)]
    pub project: Option<String>,

    /// Line number within the component, if file-level.
    #[serde(default)]
    pub line: Option<u32>,

    /// Issue message.
    #[serde(default)]
    pub message: Option<String>,

    /// Workflow status.
    #[serde(default)]
    pub status: Option<String>,

    /// Resolution, when the issue is resolved.
    #[serde(default)]
    pub resolution: Option<String>,

    /// Login of the assignee.
    #[serde(default)]
    pub assignee: Option<String>,

    /// Issue tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Issue type ("BUG", "CODE_SMELL", ...).
    #[serde(rename = "type", default)]
    pub issue_type: Option<String>,

    /// When the issue was first detected.
    #[serde(default)]
    pub creation_date: Option<String>,
}

/// Options for `api/issues/search`.
#[derive(Debug, Clone, Default)]
pub struct SearchIssuesOpts {
    /// Restrict to issues on these components (comma-joined).
    pub component_keys: Vec<String>,
    /// Restrict to these severities.
    pub severities: Vec<String>,
    /// Restrict to these workflow statuses.
    pub statuses: Vec<String>,
    /// Restrict to these resolutions.
    pub resolutions: Vec<String>,
    /// Restrict to these issue types.
    pub types: Vec<String>,
    /// Restrict to issues carrying any of these tags.
    pub tags: Vec<String>,
    /// Restrict to issues assigned to these logins.
    pub assignees: Vec<String>,
    /// Filter on assignment state.
    pub assigned: Option<bool>,
    /// Only issues created after this date.
    pub created_after: Option<String>,
    /// Pagination.
    pub page: PageParams,
}

impl SearchIssuesOpts {
    pub fn validate(&self) -> Checked {
        validate::each_one_of("severities", &self.severities, SEVERITIES)?;
        validate::each_one_of("statuses", &self.statuses, STATUSES)?;
        validate::each_one_of("resolutions", &self.resolutions, RESOLUTIONS)?;
        validate::each_one_of("types", &self.types, TYPES)?;
        self.page.validate()?;
        Ok(())
    }
}

impl ToQuery for SearchIssuesOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.csv("componentKeys", &self.component_keys);
        query.csv("severities", &self.severities);
        query.csv("statuses", &self.statuses);
        query.csv("resolutions", &self.resolutions);
        query.csv("types", &self.types);
        query.csv("tags", &self.tags);
        query.csv("assignees", &self.assignees);
        query.opt("assigned", self.assigned);
        query.opt_str("createdAfter", self.created_after.as_deref());
        self.page.apply(&mut query);
        query
    }
}

/// Options for `api/issues/assign`.
#[derive(Debug, Clone, Default)]
pub struct AssignIssueOpts {
    /// Key of the issue. Required.
    pub issue: String,
    /// Login of the new assignee. Absent to unassign.
    pub assignee: Option<String>,
}

impl AssignIssueOpts {
    pub fn validate(&self) -> Checked {
        validate::require("issue", &self.issue)
    }
}

impl ToQuery for AssignIssueOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("issue", &self.issue);
        query.opt_str("assignee", self.assignee.as_deref());
        query
    }
}

/// Options for `api/issues/set_tags`.
#[derive(Debug, Clone, Default)]
pub struct SetIssueTagsOpts {
    /// Key of the issue. Required.
    pub issue: String,
    /// Replacement tag set. An empty list clears all tags, so the `tags`
    /// parameter is sent even when empty.
    pub tags: Vec<String>,
}

impl SetIssueTagsOpts {
    pub fn validate(&self) -> Checked {
        validate::require("issue", &self.issue)
    }
}

impl ToQuery for SetIssueTagsOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("issue", &self.issue);
        query.csv_always("tags", &self.tags);
        query
    }
}

#[derive(Debug, Deserialize)]
struct SearchIssuesResponse {
    paging: Paging,
    issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    issue: Issue,
}

/// Search issues (single page, using the pagination in `opts`).
#[tracing::instrument(skip(client))]
pub async fn search(client: &SonarClient, opts: &SearchIssuesOpts) -> Result<Page<Issue>> {
    opts.validate()?;
    let response = client.get("api/issues/search", &opts.to_query()).await?;
    let data: SearchIssuesResponse = client::json(response).await?;
    Ok(Page::from_paging(data.issues, &data.paging))
}

/// Assign an issue, or unassign it when no assignee is given.
#[tracing::instrument(skip(client))]
pub async fn assign(client: &SonarClient, opts: &AssignIssueOpts) -> Result<Issue> {
    opts.validate()?;
    let response = client.post("api/issues/assign", &opts.to_query()).await?;
    let data: IssueResponse = client::json(response).await?;
    Ok(data.issue)
}

/// Replace an issue's tags. An empty tag list clears them.
#[tracing::instrument(skip(client))]
pub async fn set_tags(client: &SonarClient, opts: &SetIssueTagsOpts) -> Result<Issue> {
    opts.validate()?;
    let response = client.post("api/issues/set_tags", &opts.to_query()).await?;
    let data: IssueResponse = client::json(response).await?;
    Ok(data.issue)
}

#[async_trait]
impl Search for Issue {
    type Options = SearchIssuesOpts;

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
