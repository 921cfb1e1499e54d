//! System liveness and status endpoints.

use serde::Deserialize;

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::query::QueryParams;

/// Server status as reported by `api/system/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// Server instance id.
    pub id: String,
    /// Server version (e.g. "9.9.1.69595").
    pub version: String,
    /// Lifecycle state ("UP", "STARTING", "DB_MIGRATION_NEEDED", ...).
    pub status: String,
}

/// Health report from `api/system/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    /// "GREEN", "YELLOW" or "RED".
    pub health: String,
    /// Why the server is not green.
    #[serde(default)]
    pub causes: Vec<HealthCause>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthCause {
    pub message: String,
}

/// Liveness probe. The body is the bare string "pong".
#[tracing::instrument(skip(client))]
pub async fn ping(client: &SonarClient) -> Result<String> {
    let response = client.get("api/system/ping", &QueryParams::new()).await?;
    client::text(response).await
}

/// Current lifecycle status of the server.
#[tracing::instrument(skip(client))]
pub async fn status(client: &SonarClient) -> Result<SystemStatus> {
    let response = client.get("api/system/status", &QueryParams::new()).await?;
    client::json(response).await
}

/// Health of the server, with causes when degraded.
#[tracing::instrument(skip(client))]
pub async fn health(client: &SonarClient) -> Result<Health> {
    let response = client.get("api/system/health", &QueryParams::new()).await?;
    client::json(response).await
}
