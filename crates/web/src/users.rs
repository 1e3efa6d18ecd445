//! Local mirror of the remote user collection.

use accesspanel_auth::User;
use accesspanel_core::UserId;
use accesspanel_infra::{ClientConfig, GatewayError, UserGateway};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Users as last reported by the gateway.
///
/// The directory never removes or adds a user on its own: every change is
/// applied after the gateway confirms it. Loading happens at most once per
/// directory unless a load fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
    state: LoadState,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Message of the last failed load.
    pub fn load_error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Claim the right to fetch. Returns `false` if a fetch already ran or is
    /// in flight, so a page rendering twice does not load twice.
    pub fn begin_load(&mut self) -> bool {
        match self.state {
            LoadState::Idle | LoadState::Failed(_) => {
                self.state = LoadState::Loading;
                true
            }
            LoadState::Loading | LoadState::Loaded => false,
        }
    }

    /// Apply the result of a fetch started with [`begin_load`](Self::begin_load).
    pub fn finish_load(&mut self, result: Result<Vec<User>, GatewayError>) {
        match result {
            Ok(users) => {
                tracing::info!(count = users.len(), "user directory loaded");
                self.users = users;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load users");
                self.state = LoadState::Failed(err.user_message());
            }
        }
    }

    /// Apply the result of a delete request. The user disappears only once
    /// the gateway has confirmed it.
    pub fn finish_delete(&mut self, id: UserId, result: Result<(), GatewayError>) -> Result<(), GatewayError> {
        match result {
            Ok(()) => {
                self.users.retain(|u| u.id != id);
                tracing::info!(user_id = %id, "user deleted");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(user_id = %id, error = %err, "failed to delete user");
                Err(err)
            }
        }
    }

    /// Load once through `gateway`. Returns whether a fetch was made.
    pub async fn ensure_loaded<G>(&mut self, gateway: &G) -> Result<bool, GatewayError>
    where
        G: UserGateway + ?Sized,
    {
        if !self.begin_load() {
            return Ok(false);
        }
        let result = gateway.load_users().await;
        let outcome = result.as_ref().map(|_| true).map_err(|e| e.clone());
        self.finish_load(result);
        outcome
    }

    /// Ask `gateway` to delete `id`, then mirror the confirmed state.
    pub async fn delete<G>(&mut self, id: UserId, gateway: &G) -> Result<(), GatewayError>
    where
        G: UserGateway + ?Sized,
    {
        let result = gateway.delete_user(id).await;
        self.finish_delete(id, result)
    }
}

/// Avatar shown for `user`: its own image, or the configured default.
pub fn avatar_for<'a>(user: &'a User, config: &'a ClientConfig) -> &'a str {
    user.image_url().unwrap_or(&config.default_avatar_url)
}
