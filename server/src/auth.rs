//! Explicit identity resolution.
//!
//! The login layer (out of scope here) authenticates a request and attaches
//! a [`Principal`] to its extensions. Handlers that need an identity take a
//! [`CurrentUser`] extractor, which resolves the principal through the
//! [`UserResolver`] handle on [`AppState`]. Nothing reads ambient global
//! state; tests swap in the resolver from [`crate::testing`].

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{database, error::AppError, models::User, state::AppState};

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_MODERATOR: &str = "ROLE_MODERATOR";

/// Authenticated identity attached to a request by the login layer.
///
/// Federated principals come out of the real OAuth2 login flow. Local
/// principals carry a bare username plus granted roles and stand in for
/// that flow in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Federated { subject: String },
    Local { username: String, roles: Vec<String> },
}

/// Resolved identity for the request being handled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user: User,
    pub roles: Vec<String>,
}

impl CurrentUser {
    pub fn from_user(user: User) -> Self {
        let mut roles = vec![ROLE_USER.to_string()];
        if user.admin {
            roles.push(ROLE_ADMIN.to_string());
        }
        if user.moderator {
            roles.push(ROLE_MODERATOR.to_string());
        }

        Self { user, roles }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn can_moderate(&self) -> bool {
        self.has_role(ROLE_ADMIN) || self.has_role(ROLE_MODERATOR)
    }
}

/// Resolves a principal to a user record.
///
/// `Ok(None)` means "not handled by this resolver"; the extractor turns it
/// into a 401.
#[async_trait]
pub trait UserResolver: Send + Sync {
    async fn resolve(&self, principal: &Principal) -> Result<Option<CurrentUser>, AppError>;
}

/// Production resolver: federated subjects are looked up in the users
/// table. Local principals are not handled.
pub struct DbUserResolver {
    pool: SqlitePool,
}

impl DbUserResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserResolver for DbUserResolver {
    async fn resolve(&self, principal: &Principal) -> Result<Option<CurrentUser>, AppError> {
        let Principal::Federated { subject } = principal else {
            return Ok(None);
        };

        let Some(user) = database::user_by_google_sub(&self.pool, subject).await? else {
            return Ok(None);
        };

        Ok(Some(CurrentUser::from_user(user)))
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AppError::Unauthorized)?;

        state
            .user_resolver
            .resolve(&principal)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
