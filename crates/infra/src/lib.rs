//! `accesspanel-infra` — adapters to the world outside the page.
//!
//! The remote user collection (login, registration, listing, deletion) sits
//! behind [`UserGateway`]; [`ClientConfig`] says where it lives.

pub mod config;
pub mod gateway;

pub use config::{ClientConfig, ConfigError};
pub use gateway::{GatewayError, HttpUserGateway, InMemoryUserGateway, UserGateway};
