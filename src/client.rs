//! SonarQube API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Endpoint-specific operations live in the service modules and delegate
//! here for request building, execution, and status checking.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, SonarError};
use crate::query::QueryParams;

const DEFAULT_HOST_URL: &str = "http://localhost:9000";
const USER_AGENT: &str = concat!("sonarapi/", env!("CARGO_PKG_VERSION"));

/// Credentials for the Web API.
///
/// The server authenticates with HTTP Basic. A user token is passed as the
/// username with an empty password, per the server's convention.
#[derive(Clone)]
pub enum Auth {
    /// A user token (sent as the Basic username, empty password).
    Token(String),
    /// A username/password pair.
    Basic { username: String, password: String },
}

impl Auth {
    pub fn token(token: impl Into<String>) -> Self {
        Auth::Token(token.into())
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Token(_) => f.write_str("Auth::Token(..)"),
            Auth::Basic { .. } => f.write_str("Auth::Basic(..)"),
        }
    }
}

/// Low-level SonarQube API client.
///
/// Owns the base URL, the credentials, and the HTTP connection pool, and is
/// immutable after construction. This struct is cheaply cloneable; clones
/// reference the same underlying connection pool, and concurrent calls share
/// nothing else, so a single client can serve many tasks.
///
/// # Example
///
/// ```no_run
/// use sonarapi::{Auth, SonarClient};
///
/// # fn example() -> sonarapi::Result<()> {
/// // Create from environment variables
/// let client = SonarClient::from_env()?;
///
/// // Or configure manually
/// let client = SonarClient::new("https://sonar.example.com", Auth::token("squ_abc123"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SonarClient {
    http: Client,
    base_url: Arc<Url>,
    auth: Auth,
}

impl std::fmt::Debug for SonarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SonarClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SonarClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SONAR_TOKEN` for authentication and optionally `SONAR_HOST_URL`
    /// for the base URL (defaults to `http://localhost:9000`).
    ///
    /// # Errors
    ///
    /// Returns an error if `SONAR_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("SONAR_TOKEN").map_err(|_| {
            SonarError::ConfigMissing("SONAR_TOKEN environment variable not set".to_string())
        })?;

        let base_url =
            env::var("SONAR_HOST_URL").unwrap_or_else(|_| DEFAULT_HOST_URL.to_string());

        Self::new(&base_url, Auth::token(token))
    }

    /// Create a new client with the provided base URL and credentials.
    ///
    /// Endpoint paths are resolved relative to the base URL, so
    /// `https://sonar.example.com` and `https://sonar.example.com/` are
    /// equivalent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid. This is a client
    /// misconfiguration, distinct from per-call validation failures.
    pub fn new(base_url: &str, auth: Auth) -> Result<Self> {
        // Ensure base URL ends with / so relative joins keep the last segment
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SonarError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            auth,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request to a relative endpoint path (e.g. `api/system/status`).
    #[tracing::instrument(skip(self, query))]
    pub async fn get(&self, path: &str, query: &QueryParams) -> Result<Response> {
        let request = self.request(reqwest::Method::GET, path, query)?;
        self.execute(request).await
    }

    /// Make a POST request to a relative endpoint path.
    ///
    /// The Web API takes POST parameters in the query string as well; the
    /// request carries no body.
    #[tracing::instrument(skip(self, query))]
    pub async fn post(&self, path: &str, query: &QueryParams) -> Result<Response> {
        let request = self.request(reqwest::Method::POST, path, query)?;
        self.execute(request).await
    }

    /// Build a request: join the endpoint onto the base URL, attach query
    /// parameters and credentials.
    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &QueryParams,
    ) -> Result<reqwest::RequestBuilder> {
        let url = self.base_url.join(path)?;

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        request = match &self.auth {
            Auth::Token(token) => request.basic_auth(token, None::<&str>),
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
        };
        Ok(request)
    }

    /// Send the request and check the response status.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(SonarError::HttpError)?;
        Self::check_response(response).await
    }

    /// Check response status and convert non-2xx into API errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let messages = Self::extract_error_messages(response, status).await;
        Err(SonarError::ApiError {
            status: status.as_u16(),
            messages,
        })
    }

    /// Extract error messages from a failed response.
    ///
    /// The server reports errors as `{"errors":[{"msg":"..."}]}`; anything
    /// else falls back to the raw body or the status line.
    async fn extract_error_messages(
        response: Response,
        status: reqwest::StatusCode,
    ) -> Vec<String> {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return vec![format!("HTTP {status}")],
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
                let messages: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if !messages.is_empty() {
                    return messages;
                }
            }
        }

        if body.is_empty() {
            vec![format!("HTTP {status}")]
        } else {
            vec![body]
        }
    }
}

/// Decode a checked response body as JSON.
pub(crate) async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json().await.map_err(SonarError::HttpError)
}

/// Read a checked response body as plain text.
pub(crate) async fn text(response: Response) -> Result<String> {
    response.text().await.map_err(SonarError::HttpError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug_hides_credentials() {
        let client =
            SonarClient::new("https://sonar.example.com", Auth::token("secret-token")).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("SonarClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("secret-token"));

        let auth = format!("{:?}", Auth::basic("admin", "hunter2"));
        assert!(!auth.contains("hunter2"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = SonarClient::new("https://sonar.example.com", Auth::token("t")).unwrap();
        let client2 = SonarClient::new("https://sonar.example.com/", Auth::token("t")).unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_invalid_base_url_is_a_construction_error() {
        let result = SonarClient::new("not a url", Auth::token("t"));
        assert!(matches!(result, Err(SonarError::UrlError(_))));
    }

    #[test]
    fn test_endpoint_join_keeps_base_path() {
        let client = SonarClient::new("https://host/sonar", Auth::token("t")).unwrap();
        let joined = client.base_url().join("api/system/status").unwrap();
        assert_eq!(joined.as_str(), "https://host/sonar/api/system/status");
    }
}
