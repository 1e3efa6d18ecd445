//! `accesspanel-auth` — account records, the signed-in session, and the
//! login/registration form model.
//!
//! This crate is intentionally decoupled from rendering and transport.

pub mod forms;
pub mod roles;
pub mod session;
pub mod user;
pub mod validation;

pub use forms::{LoginForm, RegisterForm};
pub use roles::{AccountRole, UnknownRole};
pub use session::Session;
pub use user::{Credentials, Registration, User};
pub use validation::{Field, FieldErrors, Rule};
