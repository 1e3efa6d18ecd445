//! Remote collection gateway boundary.
//!
//! The gateway owns the authoritative user collection. Callers mirror what it
//! reports and never assume a call succeeded until it resolves.

pub mod http;
pub mod in_memory;
pub mod r#trait;

pub use http::HttpUserGateway;
pub use in_memory::InMemoryUserGateway;
pub use r#trait::{GatewayError, UserGateway};
