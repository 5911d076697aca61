//! # Profile store — the data-access seam of the edit-profile feature
//!
//! [`ProfileStore`] is the capability set the HTTP handlers are given. It is an
//! object-safe async trait so the server can hold an `Arc<dyn ProfileStore>` and
//! tests can swap the Postgres implementation for [`crate::MemoryStore`].
//!
//! | Method | Touches |
//! |--------|---------|
//! | [`read_profile`](ProfileStore::read_profile) | `app_user` joined with `employer` or `freelancer` |
//! | [`write_employer`](ProfileStore::write_employer) | `employer.budget` |
//! | [`write_freelancer`](ProfileStore::write_freelancer) | `freelancer.bio`, `freelancer.profile_picture` |
//! | [`write_user`](ProfileStore::write_user) | `app_user.name`, `app_user.location` |
//! | [`apply_update`](ProfileStore::apply_update) | all of the above for one submission |
//!
//! Writes never replace a stored value with absence: a `None` field keeps the
//! current column value.

use async_trait::async_trait;

use crate::models::{
    DetailsUpdate, EmployerFields, FreelancerFields, Profile, ProfileUpdate, UserFields, UserId,
    UserType,
};

/// Errors raised by a [`ProfileStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No joined row exists for the user and type.
    #[error("no {user_type} profile for user {user_id}")]
    NotFound { user_id: UserId, user_type: UserType },
    /// More than one joined row exists, which breaks the 1:1 invariant.
    #[error("found {rows} {user_type} profiles for user {user_id}, expected one")]
    Ambiguous {
        user_id: UserId,
        user_type: UserType,
        rows: usize,
    },
    #[error("storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Backend(err.into())
    }
}

/// Read and partial-update access to job-board profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch exactly one joined profile row for `user_id`.
    async fn read_profile(&self, user_id: UserId, user_type: UserType)
        -> Result<Profile, StoreError>;

    async fn write_employer(&self, user_id: UserId, fields: &EmployerFields)
        -> Result<(), StoreError>;

    async fn write_freelancer(
        &self,
        user_id: UserId,
        fields: &FreelancerFields,
    ) -> Result<(), StoreError>;

    async fn write_user(&self, user_id: UserId, fields: &UserFields) -> Result<(), StoreError>;

    /// Apply a whole submission: the type-specific row first, then `app_user`.
    ///
    /// The default runs the individual writes one after another. Implementations
    /// backed by a transactional store override it so the submission commits as a
    /// unit.
    async fn apply_update(&self, user_id: UserId, update: &ProfileUpdate) -> Result<(), StoreError> {
        match &update.details {
            DetailsUpdate::Employer(fields) if !fields.is_empty() => {
                self.write_employer(user_id, fields).await?
            }
            DetailsUpdate::Freelancer(fields) if !fields.is_empty() => {
                self.write_freelancer(user_id, fields).await?
            }
            _ => {}
        }
        if !update.user.is_empty() {
            self.write_user(user_id, &update.user).await?;
        }
        Ok(())
    }
}
