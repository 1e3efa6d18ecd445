use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use accesspanel_auth::{Credentials, Registration, User};
use accesspanel_core::UserId;

use super::r#trait::{GatewayError, UserGateway};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const EMAIL_TAKEN: &str = "Email is already registered";
pub const NO_IDS_LEFT: &str = "No user ids left";

/// In-memory user collection.
///
/// Intended for tests/dev. Counts calls so tests can assert how often the
/// remote side was hit.
#[derive(Debug, Default)]
pub struct InMemoryUserGateway {
    users: RwLock<Vec<User>>,
    load_calls: AtomicUsize,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
}

impl InMemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.read().map(|u| u.clone()).unwrap_or_default()
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    fn poisoned() -> GatewayError {
        GatewayError::Network("in-memory gateway lock poisoned".to_string())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl UserGateway for InMemoryUserGateway {
    async fn load_users(&self) -> Result<Vec<User>, GatewayError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), GatewayError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, GatewayError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        users
            .iter()
            .find(|u| u.email == credentials.email && u.password == credentials.password)
            .cloned()
            .ok_or_else(|| GatewayError::Rejected(INVALID_CREDENTIALS.to_string()))
    }

    async fn register(&self, registration: &Registration) -> Result<User, GatewayError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        if users.iter().any(|u| u.email == registration.email) {
            return Err(GatewayError::Rejected(EMAIL_TAKEN.to_string()));
        }

        let id = match users.iter().map(|u| u.id).max() {
            Some(max) => max
                .next()
                .ok_or_else(|| GatewayError::Rejected(NO_IDS_LEFT.to_string()))?,
            None => UserId::new(1),
        };

        let user = User {
            id,
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            email: registration.email.clone(),
            role: registration.role.as_str().to_string(),
            password: registration.password.clone(),
            image: registration.image.clone(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
