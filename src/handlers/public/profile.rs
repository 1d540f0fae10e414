// handlers/public/profile.rs - profile lookups open to anonymous callers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::database::models::{Profile, ProfileOwner};
use crate::error::ApiError;
use crate::state::AppState;

const PROFILE_NOT_FOUND: &str = "Profile not found";

/// GET /api/profile - List every profile with its owner's name and avatar
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Profile<ProfileOwner>>>, ApiError> {
    let profiles = state.store.list_populated_profiles().await?;
    Ok(Json(profiles))
}

/// GET /api/profile/users/:user_id - Profile of a given user
///
/// A malformed id is answered the same way as an unknown one.
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile<ProfileOwner>>, ApiError> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::not_found(PROFILE_NOT_FOUND))?;

    state
        .store
        .find_populated_profile(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PROFILE_NOT_FOUND))
}
