//! # RBAC Core
//!
//! The domain layer of the RBAC demo.
//! Entities, the ports infrastructure must implement, and the role gate that
//! decides whether a bearer token may reach a protected endpoint.

pub mod access;
pub mod domain;
pub mod error;
pub mod ports;

pub use access::RoleGate;
pub use error::RepoError;
