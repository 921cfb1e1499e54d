//! Server metadata endpoints.

use crate::client::{self, SonarClient};
use crate::error::Result;
use crate::query::QueryParams;

/// Server version, as a bare text body (e.g. "9.9.1.69595").
#[tracing::instrument(skip(client))]
pub async fn version(client: &SonarClient) -> Result<String> {
    let response = client.get("api/server/version", &QueryParams::new()).await?;
    client::text(response).await
}
