//! Bearer-token authentication and permission checks.
//!
//! Handlers pull the caller out of the `Authorization: Bearer <token>` header
//! through these helpers and answer 401/403 when the check fails.

use super::protocol::{ApiError, api_error};
use super::store::AccountStore;
use super::types::User;
use axum::http::{HeaderMap, StatusCode, header};

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// The caller, if a valid token was presented. Anonymous access is fine for
/// read endpoints, so this never errors.
pub fn current_user(headers: &HeaderMap, accounts: &AccountStore) -> Option<User> {
    accounts.user_for_token(bearer_token(headers)?)
}

/// 401 unless a valid token identifies a user.
pub fn require_user(headers: &HeaderMap, accounts: &AccountStore) -> Result<User, ApiError> {
    current_user(headers, accounts)
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "Authentication required"))
}

/// 401 without a user, 403 without the admin flag.
pub fn require_admin(headers: &HeaderMap, accounts: &AccountStore) -> Result<User, ApiError> {
    let user = require_user(headers, accounts)?;
    if user.is_admin {
        Ok(user)
    } else {
        Err(api_error(StatusCode::FORBIDDEN, "Permission denied"))
    }
}

/// Object-level check for owned resources: the owner or an admin may write.
pub fn require_owner_or_admin(user: &User, owner_id: u64) -> Result<(), ApiError> {
    if user.id == owner_id || user.is_admin {
        Ok(())
    } else {
        Err(api_error(StatusCode::FORBIDDEN, "Permission denied"))
    }
}
