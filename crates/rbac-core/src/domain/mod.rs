//! Domain entities - the core business objects.

mod company;
mod role;
mod template;
mod user;

pub use company::Company;
pub use role::Role;
pub use template::Template;
pub use user::{User, UserAccount};
