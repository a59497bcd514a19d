use chrono::{DateTime, NaiveDate, Utc};

/// How long a password-reset code stays redeemable.
pub const OTP_TTL_SECONDS: i64 = 60;

#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub password_hash: String,
    pub is_admin: bool,
    pub profile: Profile,
}

/// Per-user profile, one-to-one with [`User`].
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// A pending password-reset code. At most one exists per user; issuing a new
/// one replaces (and thereby invalidates) the previous code.
#[derive(Debug, Clone)]
pub struct PasswordResetOtp {
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetOtp {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at).num_seconds() > OTP_TTL_SECONDS
    }
}
