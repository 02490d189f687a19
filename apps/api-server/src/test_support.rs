//! Shared fixtures for handler and middleware tests.

use std::sync::Arc;

use serde_json::json;

use rbac_core::domain::{Company, Role, Template, User};
use rbac_core::ports::{IdentityClaim, PasswordService, TokenService};
use rbac_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const PASSWORD: &str = "secret";

pub const ACME: i32 = 1;
pub const GLOBEX: i32 = 2;

pub const USER_ROLE: i32 = 1;
pub const ADMIN_ROLE: i32 = 2;
pub const GUEST_ROLE: i32 = 3;

pub struct Fixture {
    pub state: AppState,
    pub tokens: Arc<JwtTokenService>,
}

impl Fixture {
    pub fn token_for(&self, user_id: i32, company_id: i32, role_id: i32) -> String {
        self.tokens
            .issue(IdentityClaim {
                user_id,
                company_id,
                role_id,
            })
            .unwrap()
    }
}

/// Two companies, three roles, one user per role, templates for both companies.
pub async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let passwords = Arc::new(Argon2PasswordService::new());
    let tokens = Arc::new(JwtTokenService::new(JwtConfig::new(TEST_SECRET)).unwrap());

    for (id, name) in [(ACME, "Acme"), (GLOBEX, "Globex")] {
        store
            .insert_company(Company {
                id,
                name: name.to_string(),
            })
            .await;
    }

    store
        .insert_role(Role::new(USER_ROLE, "user", vec!["templates:read".to_string()]))
        .await;
    store
        .insert_role(Role::new(
            ADMIN_ROLE,
            "admin",
            vec!["templates:read".to_string(), "templates:write".to_string()],
        ))
        .await;
    store.insert_role(Role::new(GUEST_ROLE, "guest", vec![])).await;

    let password_hash = passwords.hash(PASSWORD).unwrap();
    let users = [
        (10, "alice", "a@b.com", ACME, USER_ROLE),
        (11, "bob", "admin@globex.com", GLOBEX, ADMIN_ROLE),
        (12, "gail", "guest@b.com", ACME, GUEST_ROLE),
    ];
    for (id, username, email, company_id, role_id) in users {
        store
            .insert_user(User {
                id,
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.clone(),
                company_id,
                role_id,
            })
            .await;
    }

    let templates = [
        (100, "Invoice", ACME),
        (101, "Receipt", ACME),
        (200, "Contract", GLOBEX),
    ];
    for (id, name, company_id) in templates {
        store
            .insert_template(Template {
                id,
                name: name.to_string(),
                data: json!({ "title": name }),
                company_id,
            })
            .await;
    }

    let state = AppState::in_memory(store, tokens.clone(), passwords);

    Fixture { state, tokens }
}
