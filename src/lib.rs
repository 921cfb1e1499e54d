//! SonarQube Web API client library.
//!
//! A Rust library for interacting with a SonarQube server's Web API. Every
//! endpoint call follows the same pipeline: a typed options struct is
//! validated locally, encoded into query parameters, sent with Basic
//! authentication, and the response is decoded as JSON, plain text, or a
//! raw body stream depending on the endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use sonarapi::{projects, SonarClient, Search};
//! use sonarapi::projects::{CreateProjectOpts, Project};
//!
//! #[tokio::main]
//! async fn main() -> sonarapi::Result<()> {
//!     // Create client from environment variables
//!     let client = SonarClient::from_env()?;
//!
//!     // Create a project
//!     let project = projects::create(&client, &CreateProjectOpts {
//!         name: "My Project".to_string(),
//!         project: "org.example:my-project".to_string(),
//!         ..Default::default()
//!     }).await?;
//!     println!("Created: {}", project.key);
//!
//!     // List all projects
//!     let all = Project::search_all(&client, &Default::default()).await?;
//!     println!("Found {} projects", all.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The shared pipeline lives in a handful of modules:
//!
//! - [`SonarClient`] builds and executes requests (base URL join, Basic
//!   auth, query attachment, status checking).
//! - [`query`] encodes options structs into query parameters under the
//!   API's conventions (comma-joined lists, `;`-joined `key=value` maps,
//!   always-present parameters).
//! - [`validate`] holds the field-validation primitives every options
//!   struct's `validate()` composes, fail-fast, before any I/O.
//! - [`pagination`] is the shared page/page-size value object and the
//!   [`Page`] result container.
//!
//! The service modules (`projects`, `rules`, `issues`, ...) enumerate the
//! endpoints; each is a thin layer over the pipeline.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SONAR_TOKEN` (required) - A user token
//! - `SONAR_HOST_URL` (optional) - Base URL (defaults to `http://localhost:9000`)

mod client;
mod error;
pub mod pagination;
pub mod query;
mod services;
mod traits;
pub mod validate;

// Re-export core types
pub use client::{Auth, SonarClient};
pub use error::{Result, SonarError};
pub use pagination::{Page, PageParams, Paging};
pub use query::{QueryParams, QueryValue, ToQuery};
pub use validate::{ValidationError, ValidationErrorKind};

// Re-export traits
pub use traits::{Search, DEFAULT_PAGE_SIZE};

// Re-export services
pub use services::{batch, issues, project_tags, projects, rules, server, system};
