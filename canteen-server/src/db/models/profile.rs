//! Profile Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::client::UserInfo;
use shared::models::Role;

/// Profile ID type
pub type ProfileId = RecordId;

/// User account matching the SurrealDB schema
///
/// The password hash stays in this model and never crosses the wire;
/// handlers convert to [`UserInfo`] before responding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProfileId>,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    pub role: Role,
    pub hash_pass: String,
    pub created_at: i64,
}

impl Profile {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Public view of the account
    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            mobile: self.mobile.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = Profile::hash_password("canteen-secret").expect("hash");
        let profile = Profile {
            id: None,
            email: "a@b.c".to_string(),
            full_name: "A".to_string(),
            mobile: None,
            role: Role::Customer,
            hash_pass: hash,
            created_at: 0,
        };

        assert!(profile.verify_password("canteen-secret").expect("verify"));
        assert!(!profile.verify_password("wrong").expect("verify"));
    }
}
