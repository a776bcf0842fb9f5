//! Login endpoint client
//!
//! Posts credentials to `/Access/Login` and turns the reply into a
//! [`Session`]. Nothing is stored here; the caller owns the session.

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::{ApiClient, ApiRequest};
use crate::session::{Credentials, Session};
use crate::{AccessError, Result};

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/Access/Login";

/// Something that can trade credentials for a session
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate once with the given credentials
    async fn login(&self, credentials: &Credentials) -> Result<Session>;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the login endpoint
///
/// # Example
///
/// ```rust,no_run
/// use access_client::{ApiClient, AuthClient, ClientConfig, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let auth = AuthClient::new(ApiClient::new(ClientConfig::default())?);
///     let session = auth.login(&Credentials::new("AB1234", "Abc1234!")).await?;
///     println!("token length: {}", session.token().len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: ApiClient,
}

impl AuthClient {
    /// Create a login client over an HTTP client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Authenticate and return the session
    ///
    /// # Errors
    ///
    /// - `AccessError::Auth` - the server answered with a non-2xx status
    /// - `AccessError::Protocol` - the body is not JSON or has no `token`
    /// - `AccessError::Transport` - no response was obtained
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let request = ApiRequest::post(LOGIN_PATH).json_body(credentials)?;
        let response = self.client.send(request).await?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "Login rejected");
            return Err(AccessError::Auth { status: response.status });
        }

        let parsed: LoginResponse = serde_json::from_slice(&response.body)?;
        tracing::info!(identifier = %credentials.identifier, "Login succeeded");
        Ok(Session::new(parsed.token))
    }
}

#[async_trait]
impl Authenticator for AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        AuthClient::login(self, credentials).await
    }
}
