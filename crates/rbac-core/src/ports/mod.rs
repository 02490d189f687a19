//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, IdentityClaim, PasswordService, TokenService};
pub use repository::{BaseRepository, RoleRepository, TemplateRepository, UserRepository};
