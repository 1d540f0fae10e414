// handlers/protected/profile.rs - caller-owned profile operations
//
// GET    /api/profile/me - own profile, populated with owner name and avatar
// POST   /api/profile    - create or partially update own profile
// DELETE /api/profile    - remove own profile and account

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::profile::{normalize_skills, parse_skills};
use crate::database::models::{Profile, ProfileFields, ProfileOwner, Social};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{Checks, Validate};

/// Skills arrive either as `"rust, go"` or as `["rust", "go"]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Csv(String),
    List(Vec<String>),
}

impl SkillsInput {
    pub fn normalize(&self) -> Vec<String> {
        match self {
            SkillsInput::Csv(raw) => parse_skills(raw),
            SkillsInput::List(items) => normalize_skills(items.iter().map(String::as_str)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub skills: Option<SkillsInput>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

impl Validate for ProfileRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let has_skills = self
            .skills
            .as_ref()
            .is_some_and(|skills| !skills.normalize().is_empty());

        Checks::new()
            .not_empty("status", self.status.as_deref(), "Status is required")
            .check(has_skills, "skills", "Skills is required")
            .finish()
    }
}

impl ProfileRequest {
    /// Only non-empty values become updates
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            company: present(self.company),
            website: present(self.website),
            location: present(self.location),
            bio: present(self.bio),
            status: present(self.status),
            skills: self.skills.map(|skills| skills.normalize()).filter(|s| !s.is_empty()),
            githubusername: present(self.githubusername),
            social: Social {
                youtube: present(self.youtube),
                facebook: present(self.facebook),
                twitter: present(self.twitter),
                instagram: present(self.instagram),
                linkedin: present(self.linkedin),
            },
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// GET /api/profile/me - Get the caller's profile
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile<ProfileOwner>>, ApiError> {
    state
        .store
        .find_populated_profile(user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("There is no profile for this user"))
}

/// POST /api/profile - Create or update the caller's profile
///
/// Fields left out of the request (or sent empty) keep their stored values.
/// The existence check and the write are separate round trips; two
/// concurrent first-time upserts for one user can collide on insert.
pub async fn upsert(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let fields = payload.into_fields();

    if state.store.find_profile(user.id).await?.is_some() {
        if let Some(updated) = state.store.update_profile(user.id, &fields).await? {
            tracing::debug!(user_id = %user.id, "Updated profile");
            return Ok(Json(updated));
        }
    }

    let created = state.store.insert_profile(user.id, &fields).await?;
    tracing::info!(user_id = %user.id, "Created profile");
    Ok(Json(created))
}

/// DELETE /api/profile - Delete the caller's profile and account
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    // TODO: remove the user's posts once posts are stored here
    state.store.delete_profile(user.id).await?;
    state.store.delete_user(user.id).await?;

    tracing::info!(user_id = %user.id, "Deleted profile and user");
    Ok(Json(json!({ "message": "User deleted" })))
}
