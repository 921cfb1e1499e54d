//! Scanner bootstrap endpoints: jar index, jar download, issue cache.
//!
//! These endpoints serve raw bodies. The index is plain text; the downloads
//! are binary and are handed back as the live [`reqwest::Response`] so the
//! caller streams the body itself. Everywhere else in the crate the response
//! body is consumed by decoding; here ownership transfers to the caller, who
//! must read the body to completion (or drop it) exactly once.

use reqwest::Response;

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::query::{QueryParams, ToQuery};
use crate::validate::{self, Checked};

/// Options for `batch/file`.
#[derive(Debug, Clone, Default)]
pub struct FileOpts {
    /// Name of the jar to download, as listed by [`index`]. Required.
    pub name: String,
}

impl FileOpts {
    pub fn validate(&self) -> Checked {
        validate::require("name", &self.name)
    }
}

impl ToQuery for FileOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("name", &self.name);
        query
    }
}

/// Options for `batch/project`.
#[derive(Debug, Clone, Default)]
pub struct ProjectCacheOpts {
    /// Key of the project whose issue cache to fetch. Required.
    pub key: String,
}

impl ProjectCacheOpts {
    pub fn validate(&self) -> Checked {
        validate::require("key", &self.key)
    }
}

impl ToQuery for ProjectCacheOpts {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push("key", &self.key);
        query
    }
}

/// List of scanner jars, one `name|hash` entry per line.
#[tracing::instrument(skip(client))]
pub async fn index(client: &SonarClient) -> Result<String> {
    let response = client.get("batch/index", &QueryParams::new()).await?;
    client::text(response).await
}

/// Download a scanner jar.
///
/// Returns the checked response with its body unconsumed; the caller owns
/// the stream and reads it with `bytes()` or `bytes_stream()`.
#[tracing::instrument(skip(client))]
pub async fn file(client: &SonarClient, opts: &FileOpts) -> Result<Response> {
    opts.validate()?;
    client.get("batch/file", &opts.to_query()).await
}

/// Download a project's server-side issue cache.
///
/// The body may be gzip-compressed; as with [`file`], the caller owns the
/// stream.
#[tracing::instrument(skip(client))]
pub async fn project(client: &SonarClient, opts: &ProjectCacheOpts) -> Result<Response> {
    opts.validate()?;
    client.get("batch/project", &opts.to_query()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationErrorKind;

    #[test]
    fn test_file_requires_name() {
        let err = FileOpts::default().validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingRequired);
        assert_eq!(err.field, "name");
        assert!(FileOpts {
            name: "sonar-scanner-engine.jar".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_project_cache_requires_key() {
        let err = ProjectCacheOpts::default().validate().unwrap_err();
        assert_eq!(err.field, "key");
    }
}
