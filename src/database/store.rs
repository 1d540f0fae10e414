use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Profile, ProfileFields, ProfileOwner, User};

/// Access to the users and profiles collections.
///
/// Each method is a single round trip; nothing here spans a transaction.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with [`DatabaseError::Conflict`] when the email is taken
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError>;

    /// Profile of `user_id` joined with its owner's name and avatar
    async fn find_populated_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Profile<ProfileOwner>>, DatabaseError>;

    async fn list_populated_profiles(&self) -> Result<Vec<Profile<ProfileOwner>>, DatabaseError>;

    /// `status` and `skills` must be set
    async fn insert_profile(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Profile, DatabaseError>;

    /// Apply the fields that are set; `None` when the user has no profile
    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<Profile>, DatabaseError>;

    async fn delete_profile(&self, user_id: Uuid) -> Result<bool, DatabaseError>;
}
