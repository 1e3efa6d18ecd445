//! HTTP gateway over the backend's REST API.

use async_trait::async_trait;
use serde::Deserialize;

use accesspanel_auth::{Credentials, Registration, User};
use accesspanel_core::UserId;

use super::r#trait::{GatewayError, UserGateway};

/// Error body returned by the API: `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Talks to `{api_url}/users` and `{api_url}/auth/*`.
#[derive(Debug, Clone)]
pub struct HttpUserGateway {
    client: reqwest::Client,
    api_url: String,
}

impl HttpUserGateway {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        Err(api_error(status, &text))
    }

    async fn json<T>(resp: reqwest::Response) -> Result<T, GatewayError>
    where
        T: serde::de::DeserializeOwned,
    {
        resp.json().await.map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

/// Map a non-success response to a gateway error, preferring the API's own
/// message when the body carries one.
fn api_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 | 409 => GatewayError::Rejected(message),
        _ => GatewayError::Api { status, message },
    }
}

/// A delete of a user the API does not know is reported as `NotFound`.
fn delete_error(id: UserId, err: GatewayError) -> GatewayError {
    match err {
        GatewayError::Api { status: 404, .. } => GatewayError::NotFound(id),
        other => other,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl UserGateway for HttpUserGateway {
    async fn load_users(&self) -> Result<Vec<User>, GatewayError> {
        let resp = self.send(self.client.get(self.url("users"))).await?;
        let users: Vec<User> = Self::json(resp).await?;
        tracing::debug!(count = users.len(), "users loaded");
        Ok(users)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), GatewayError> {
        let req = self.client.delete(self.url(&format!("users/{id}")));
        self.send(req)
            .await
            .map(|_| ())
            .map_err(|err| delete_error(id, err))
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        let req = self.client.post(self.url("auth/login")).json(credentials);
        let resp = self.send(req).await?;
        Self::json(resp).await
    }

    async fn register(&self, registration: &Registration) -> Result<User, GatewayError> {
        let req = self.client.post(self.url("auth/register")).json(registration);
        let resp = self.send(req).await?;
        Self::json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let gateway = HttpUserGateway::new("http://localhost:8080/");
        assert_eq!(gateway.api_url(), "http://localhost:8080");
        assert_eq!(gateway.url("/users/3"), "http://localhost:8080/users/3");
    }

    #[test]
    fn api_error_prefers_message_field() {
        assert_eq!(
            api_error(401, r#"{"message":"Invalid email or password"}"#),
            GatewayError::Rejected("Invalid email or password".to_string())
        );
        assert_eq!(
            api_error(500, "boom\n"),
            GatewayError::Api {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn delete_of_missing_user_is_not_found() {
        let id = UserId::new(3);
        assert_eq!(
            delete_error(id, api_error(404, r#"{"message":"no such user"}"#)),
            GatewayError::NotFound(id)
        );
        assert_eq!(
            delete_error(id, api_error(403, "forbidden")),
            GatewayError::Rejected("forbidden".to_string())
        );
    }
}
