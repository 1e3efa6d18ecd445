use async_trait::async_trait;
use thiserror::Error;

use accesspanel_auth::{Credentials, Registration, User};
use accesspanel_core::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// The gateway refused the request (bad credentials, duplicate account).
    #[error("{0}")]
    Rejected(String),

    #[error("user {0} not found")]
    NotFound(UserId),
}

impl GatewayError {
    /// Text suitable for the single error line under a form.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Api { message, .. } | GatewayError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Remote user collection.
///
/// In the browser the futures are not `Send` (they wrap JS promises), so the
/// trait drops the `Send` bound there.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait UserGateway {
    /// Fetch the full user collection.
    async fn load_users(&self) -> Result<Vec<User>, GatewayError>;

    /// Delete a user. Resolves once the remote side has removed it.
    async fn delete_user(&self, id: UserId) -> Result<(), GatewayError>;

    /// Authenticate and return the signed-in account.
    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError>;

    /// Create an account and return it as stored.
    async fn register(&self, registration: &Registration) -> Result<User, GatewayError>;
}
