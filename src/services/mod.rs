//! Endpoint services.
//!
//! One module per Web API service. Each module holds the options structs for
//! its endpoints (with their `validate()` and query encodings), the response
//! models, and the functions that call through the shared client pipeline.

pub mod batch;
pub mod issues;
pub mod project_tags;
pub mod projects;
pub mod rules;
pub mod server;
pub mod system;
