//! Rule endpoints: searching the rule repository and creating custom rules.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::pagination::{Page, PageParams};
use crate::query::{QueryParams, ToQuery};
use crate::traits::Search;
use crate::validate::{self, Checked};

/// Allowed rule severities.
pub const SEVERITIES: &[&str] = &["INFO", "MINOR", "MAJOR", "CRITICAL", "BLOCKER"];

/// Allowed rule statuses.
pub const STATUSES: &[&str] = &["BETA", "DEPRECATED", "READY", "REMOVED"];

/// Allowed rule types.
pub const TYPES: &[&str] = &["CODE_SMELL", "BUG", "VULNERABILITY", "SECURITY_HOTSPOT"];

/// Maximum length of a custom rule key or name, in characters.
pub const MAX_RULE_KEY_LENGTH: usize = 200;

/// A rule from the server's rule repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Full rule key (e.g. "squid:S1067").
    pub key: String,

    /// Repository the rule belongs to.
    #[serde(default)]
    pub repo: Option<String>,

    /// Rule display name.
    pub name: String,

    /// Default severity.
    #[serde(default)]
    pub severity: Option<String>,

    /// Lifecycle status ("READY", "DEPRECATED", ...).
    #[serde(default)]
    pub status: Option<String>,

    /// Language key the rule applies to.
    #[serde(default)]
    pub lang: Option<String>,

    /// Rule type ("BUG", "CODE_SMELL", ...).
    #[serde(rename = "type", default)]
    pub rule_type: Option<String>,

    /// Whether this is a template rule.
    #[serde(default)]
    pub is_template: bool,

    /// Rule tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Options for `api/rules/search`.
#[derive(Debug, Clone, Default)]
pub struct SearchRulesOpts {
    /// Restrict to rules of these languages (comma-joined).
    pub languages: Vec<String>,
    /// Restrict to these severities.
    pub severities: Vec<String>,
    /// Restrict to these lifecycle statuses.
    pub statuses: Vec<String>,
    /// Restrict to these rule types.
    pub types: Vec<String>,
    /// Restrict to these repositories.
    pub repositories: Vec<String>,
    /// Full-text filter on name and key.
    pub q: Option<String>,
    /// Pagination.
    pub page: PageParams,
}

impl SearchRulesOpts {
    pub fn validate(&self) -> Checked {
        validate::each_one_of("severities", &self.severities, SEVERITIES)?;
        validate::each_one_of("statuses", &self.statuses, STATUSES)?;
        validate::each_one_of("types", &self.types, TYPES)?;
        self.page.validate()?;
        Ok(())
    }
}

impl ToQuery for SearchRulesOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.csv("languages", &self.languages);
        query.csv("severities", &self.severities);
        query.csv("statuses", &self.statuses);
        query.csv("types", &self.types);
        query.csv("repositories", &self.repositories);
        query.opt_str("q", self.q.as_deref());
        self.page.apply(&mut query);
        query
    }
}

/// Options for `api/rules/create`.
///
/// Custom rules are instantiated from a template rule; parameters are the
/// template's parameters, sent as a `;`-joined list of `key=value` entries.
#[derive(Debug, Clone, Default)]
pub struct CreateRuleOpts {
    /// Key of the new rule, unique within its repository. Required.
    pub custom_key: String,
    /// Key of the template rule to instantiate. Required.
    pub template_key: String,
    /// Rule display name. Required.
    pub name: String,
    /// Rule description, Markdown. Required.
    pub markdown_description: String,
    /// Severity of the new rule.
    pub severity: Option<String>,
    /// Lifecycle status of the new rule.
    pub status: Option<String>,
    /// Type of the new rule.
    pub rule_type: Option<String>,
    /// Template parameter values, keyed by parameter name.
    pub params: BTreeMap<String, String>,
}

impl CreateRuleOpts {
    pub fn validate(&self) -> Checked {
        validate::require("custom_key", &self.custom_key)?;
        validate::require("template_key", &self.template_key)?;
        validate::require("name", &self.name)?;
        validate::require("markdown_description", &self.markdown_description)?;
        validate::max_length("custom_key", &self.custom_key, MAX_RULE_KEY_LENGTH)?;
        validate::max_length("name", &self.name, MAX_RULE_KEY_LENGTH)?;
        if let Some(severity) = &self.severity {
            validate::one_of("severity", severity, SEVERITIES)?;
        }
        if let Some(status) = &self.status {
            validate::one_of("status", status, STATUSES)?;
        }
        if let Some(rule_type) = &self.rule_type {
            validate::one_of("type", rule_type, TYPES)?;
        }
        Ok(())
    }
}

impl ToQuery for CreateRuleOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("custom_key", &self.custom_key);
        query.push("template_key", &self.template_key);
        query.push("name", &self.name);
        query.push("markdown_description", &self.markdown_description);
        query.opt_str("severity", self.severity.as_deref());
        query.opt_str("status", self.status.as_deref());
        query.opt_str("type", self.rule_type.as_deref());
        query.kv("params", &self.params);
        query
    }
}

/// `api/rules/search` reports paging inline rather than as a `paging` object.
#[derive(Debug, Deserialize)]
struct SearchRulesResponse {
    total: u64,
    p: u32,
    ps: u32,
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct CreateRuleResponse {
    rule: Rule,
}

/// Search rules (single page, using the pagination in `opts`).
#[tracing::instrument(skip(client))]
pub async fn search(client: &SonarClient, opts: &SearchRulesOpts) -> Result<Page<Rule>> {
    opts.validate()?;
    let response = client.get("api/rules/search", &opts.to_query()).await?;
    let data: SearchRulesResponse = client::json(response).await?;
    Ok(Page::new(data.rules, data.p, data.ps, Some(data.total)))
}

/// Create a custom rule from a template.
#[tracing::instrument(skip(client))]
pub async fn create(client: &SonarClient, opts: &CreateRuleOpts) -> Result<Rule> {
    opts.validate()?;
    let response = client.post("api/rules/create", &opts.to_query()).await?;
    let data: CreateRuleResponse = client::json(response).await?;
    Ok(data.rule)
}

#[async_trait]
impl Search for Rule {
    type Options = SearchRulesOpts;

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
