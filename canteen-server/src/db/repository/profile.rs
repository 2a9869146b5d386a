//! Profile Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Profile;

#[derive(Clone)]
pub struct ProfileRepository {
    base: BaseRepository,
}

impl ProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an account
    ///
    /// The unique index on `email` rejects a second registration with the
    /// same address.
    pub async fn create(&self, profile: Profile) -> RepoResult<Profile> {
        let created: Option<Profile> = self
            .base
            .db()
            .create("profile")
            .content(profile)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("profile_email_unique") {
                    RepoError::Duplicate("An account with this email already exists".to_string())
                } else {
                    RepoError::Database(msg)
                }
            })?;

        created.ok_or_else(|| RepoError::Database("Profile was not created".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Profile>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM profile WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;

        let profile: Option<Profile> = result.take(0)?;
        Ok(profile)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Profile>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid profile ID: {}", id)))?;

        let profile: Option<Profile> = self.base.db().select(record_id).await?;
        Ok(profile)
    }
}
