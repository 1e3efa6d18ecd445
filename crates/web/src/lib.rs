//! `accesspanel-web`
//!
//! **Responsibility:** the admin pages of the client.
//!
//! This crate provides:
//! - The role table editor, persisted to a key-value store
//! - The user directory, mirrored from the remote gateway
//! - Login/registration submission
//! - Leptos pages (browser build only)
//!
//! State types compile on the host so they can be tested without a browser.

pub mod roles;
pub mod routes;
pub mod state;
pub mod submit;
pub mod users;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use roles::{Mutation, Role, RoleEditor};
pub use routes::Route;
pub use state::AppState;
pub use submit::SubmitOutcome;
pub use users::UserDirectory;
