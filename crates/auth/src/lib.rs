//! `stockroom-auth` — admin gating for inventory mutations.
//!
//! This crate is intentionally decoupled from HTTP and storage. The request
//! layer resolves a [`Session`] and calls [`authorize`] before it touches the
//! inventory; the inventory itself never checks.

pub mod authorize;
pub mod credentials;
pub mod permissions;
pub mod roles;
pub mod session;

pub use authorize::{authorize, AuthzError};
pub use credentials::{AdminCredentials, AuthError};
pub use permissions::Permission;
pub use roles::Role;
pub use session::Session;
