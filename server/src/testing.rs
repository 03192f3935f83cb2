//! Test doubles for the collaborators a request normally reaches through
//! the login flow and the live database.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::{
    auth::{CurrentUser, Principal, UserResolver, ROLE_ADMIN, ROLE_MODERATOR},
    error::AppError,
    models::User,
};

/// Fabricates a deterministic user from a local principal, so role checks
/// can run without a real identity provider.
///
/// Federated principals are not handled; they resolve through
/// [`crate::auth::DbUserResolver`] in production.
pub struct StubUserResolver;

#[async_trait]
impl UserResolver for StubUserResolver {
    async fn resolve(&self, principal: &Principal) -> Result<Option<CurrentUser>, AppError> {
        let Principal::Local { username, roles } = principal else {
            return Ok(None);
        };

        let admin = roles.iter().any(|r| r == ROLE_ADMIN);
        let moderator = roles.iter().any(|r| r == ROLE_MODERATOR);

        let user = User {
            id: 1,
            google_sub: format!("fake_{username}"),
            email: format!("{username}@example.org"),
            full_name: format!("Fake {username}"),
            given_name: "Fake".to_string(),
            family_name: username.clone(),
            picture_url: format!("https://example.org/{username}.jpg"),
            email_verified: true,
            locale: String::new(),
            hosted_domain: "example.org".to_string(),
            admin,
            moderator,
            alias: None,
            proposed_alias: None,
            date_approved: None,
        };

        Ok(Some(CurrentUser {
            user,
            roles: roles.clone(),
        }))
    }
}

pub fn local_principal(username: &str, roles: &[&str]) -> Principal {
    Principal::Local {
        username: username.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// In-memory pool with migrations applied. Single connection, so every
/// query sees the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Cannot open in-memory database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Migrations failed!");

    pool
}
