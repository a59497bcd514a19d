use super::password::{hash_password, verify_password};
use super::types::{PasswordResetOtp, Profile, User};
use crate::storage::memory::EntityMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use uuid::Uuid;

/// Input for [`AccountStore::create_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub date_of_birth: NaiveDate,
    pub password: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}

/// Outcome of redeeming a password-reset code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpRedeem {
    /// Code matched and was consumed.
    Accepted,
    /// No live code, or the code did not match.
    Invalid,
    /// Code matched but was past its TTL; it is consumed either way.
    Expired,
}

pub struct AccountStore {
    users: EntityMap<User>,
    /// Lowercased email -> user id. Guards uniqueness at registration.
    email_index: DashMap<String, u64>,
    /// Opaque bearer token -> user id.
    sessions: DashMap<String, u64>,
    /// User id -> live password-reset code (one per user).
    otps: DashMap<u64, PasswordResetOtp>,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            users: EntityMap::new(),
            email_index: DashMap::new(),
            sessions: DashMap::new(),
            otps: DashMap::new(),
        }
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User> {
        let email = new_user.email.trim().to_string();
        if email.is_empty() {
            anyhow::bail!("Users must have an email address");
        }
        let username = new_user.username.trim().to_lowercase();
        if username.is_empty() {
            anyhow::bail!("Users must have a username");
        }

        let email_key = email.to_lowercase();
        match self.email_index.entry(email_key) {
            Entry::Occupied(_) => anyhow::bail!("Email already registered"),
            Entry::Vacant(slot) => {
                let id = self.users.insert_with(|id| User {
                    id,
                    email: email.clone(),
                    username,
                    date_of_birth: new_user.date_of_birth,
                    password_hash: hash_password(&new_user.password),
                    is_admin: new_user.is_admin,
                    profile: Profile {
                        bio: new_user.bio,
                        avatar_url: new_user.avatar_url,
                    },
                });
                slot.insert(id);
                tracing::debug!("Created user {}", id);
                Ok(self.users.get(id).expect("user just inserted"))
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.users.get(id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let key = email.trim().to_lowercase();
        let id = *self.email_index.get(&key)?;
        self.users.get(id)
    }

    /// Verifies credentials, returning the user on a match.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let user = self.user_by_email(email)?;
        if verify_password(password, &user.password_hash) {
            Some(user)
        } else {
            None
        }
    }

    // ---- sessions ----

    pub fn create_session(&self, user_id: u64) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user_id);
        token
    }

    pub fn user_for_token(&self, token: &str) -> Option<User> {
        let user_id = *self.sessions.get(token)?;
        self.users.get(user_id)
    }

    pub fn revoke_sessions(&self, user_id: u64) {
        self.sessions.retain(|_, id| *id != user_id);
    }

    // ---- profile updates ----

    /// Applies a partial update. A changed email re-checks uniqueness and
    /// moves the index entry.
    pub fn update_user<F>(&self, user_id: u64, new_email: Option<String>, apply: F) -> Result<User>
    where
        F: FnOnce(&mut User),
    {
        let current = self
            .users
            .get(user_id)
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        if let Some(email) = new_email {
            let email = email.trim().to_string();
            if email.is_empty() {
                anyhow::bail!("Users must have an email address");
            }
            let new_key = email.to_lowercase();
            let old_key = current.email.to_lowercase();
            if new_key != old_key {
                match self.email_index.entry(new_key) {
                    Entry::Occupied(_) => anyhow::bail!("Email already registered"),
                    Entry::Vacant(slot) => {
                        slot.insert(user_id);
                    }
                }
                self.email_index.remove(&old_key);
            }
            self.users.update(user_id, |user| user.email = email);
        }

        self.users.update(user_id, apply);
        Ok(self.users.get(user_id).expect("user exists"))
    }

    pub fn set_password(&self, user_id: u64, password: &str) -> bool {
        self.users
            .update(user_id, |user| user.password_hash = hash_password(password))
    }

    // ---- password reset ----

    /// Issues a fresh 4-digit reset code, replacing any previous one.
    pub fn issue_otp(&self, user_id: u64, now: DateTime<Utc>) -> PasswordResetOtp {
        let code = format!("{}", rand::thread_rng().gen_range(1000..=9999));
        let otp = PasswordResetOtp {
            code,
            created_at: now,
        };
        self.otps.insert(user_id, otp.clone());
        otp
    }

    pub fn redeem_otp(&self, user_id: u64, code: &str, now: DateTime<Utc>) -> OtpRedeem {
        let Some(otp) = self.otps.get(&user_id).map(|row| row.value().clone()) else {
            return OtpRedeem::Invalid;
        };
        if otp.code != code {
            return OtpRedeem::Invalid;
        }

        self.otps.remove(&user_id);
        if otp.is_expired(now) {
            OtpRedeem::Expired
        } else {
            OtpRedeem::Accepted
        }
    }
}
