//! SeaORM entities backing the credential store.

pub mod company;
pub mod role;
pub mod template;
pub mod user;
