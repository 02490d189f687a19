//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{DEFAULT_EXPIRATION_SECS, JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
