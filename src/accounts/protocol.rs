//! Accounts API Protocol
//!
//! Data Transfer Objects (DTOs) for the account endpoints, plus the shared
//! error bodies used across the whole API surface.

use super::types::User;
use axum::Json;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Uniform error payload: `{"error": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Informational payload: `{"message": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Terminal-success payload for the reset flow: `{"detail": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailBody {
    pub detail: String,
}

/// Error half of a handler result.
pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, error: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub password: String,
    pub password2: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Partial profile update; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RequestOtpRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub password2: String,
}

/// Public user representation; the profile is flattened in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOut {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&User> for UserOut {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            date_of_birth: user.date_of_birth,
            bio: user.profile.bio.clone(),
            avatar_url: user.profile.avatar_url.clone(),
        }
    }
}
