use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Profile, ProfileFields, ProfileOwner, User};
use crate::database::store::Store;

/// In-process store with the same contract as the PostgreSQL one.
///
/// Populated lookups behave like an inner join: a profile whose owner is gone
/// is not returned.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    /// keyed by owning user id
    profiles: HashMap<Uuid, Profile>,
}

impl Collections {
    fn populate(&self, profile: &Profile) -> Option<Profile<ProfileOwner>> {
        let owner = self.users.get(&profile.user)?;
        Some(profile.clone().populate(ProfileOwner {
            id: owner.id,
            name: owner.name.clone(),
            avatar: owner.avatar.clone(),
        }))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.collections.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut collections = self.collections.write().await;
        if collections.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password: user.password,
            avatar: user.avatar,
            created_at: Utc::now(),
        };
        collections.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.collections.write().await.users.remove(&id).is_some())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        Ok(self.collections.read().await.profiles.get(&user_id).cloned())
    }

    async fn find_populated_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Profile<ProfileOwner>>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .profiles
            .get(&user_id)
            .and_then(|profile| collections.populate(profile)))
    }

    async fn list_populated_profiles(&self) -> Result<Vec<Profile<ProfileOwner>>, DatabaseError> {
        let collections = self.collections.read().await;
        let mut profiles: Vec<_> = collections
            .profiles
            .values()
            .filter_map(|profile| collections.populate(profile))
            .collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(profiles)
    }

    async fn insert_profile(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Profile, DatabaseError> {
        let status = fields.status.clone().ok_or(DatabaseError::MissingField("status"))?;
        let skills = fields.skills.clone().ok_or(DatabaseError::MissingField("skills"))?;

        let mut collections = self.collections.write().await;
        if collections.profiles.contains_key(&user_id) {
            return Err(DatabaseError::Conflict("profiles_user_id_key".to_string()));
        }

        let mut profile = Profile {
            id: Uuid::new_v4(),
            user: user_id,
            company: None,
            website: None,
            location: None,
            bio: None,
            status,
            skills,
            githubusername: None,
            social: Default::default(),
            created_at: Utc::now(),
        };
        fields.apply_to(&mut profile);
        collections.profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<Profile>, DatabaseError> {
        let mut collections = self.collections.write().await;
        Ok(collections.profiles.get_mut(&user_id).map(|profile| {
            fields.apply_to(profile);
            profile.clone()
        }))
    }

    async fn delete_profile(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.collections.write().await.profiles.remove(&user_id).is_some())
    }
}
