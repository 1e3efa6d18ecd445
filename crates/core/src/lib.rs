//! `accesspanel-core` — domain foundation building blocks.
//!
//! Identifiers, the shared error model, and the key-value store adapter used
//! for small persisted blobs. No rendering and no network concerns.

pub mod entity;
pub mod error;
pub mod id;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod file_store;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{RoleId, UserId};
pub use store::{InMemoryKeyValueStore, KeyValueStore, StoreError};

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileKeyValueStore;
