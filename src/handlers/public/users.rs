// handlers/public/users.rs - POST /api/users handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{avatar::gravatar_url, password::hash_password};
use crate::database::models::NewUser;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{null_as_empty, Checks, Validate};

const USER_EXISTS: &str = "User already exists";

/// Missing and `null` fields arrive as empty strings and fail validation
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Checks::new()
            .not_empty("name", Some(self.name.as_str()), "Name is required")
            .email("email", Some(self.email.as_str()), "Please include a valid email")
            .min_chars(
                "password",
                Some(self.password.as_str()),
                6,
                "Please enter a password with six or more characters",
            )
            .finish()
    }
}

/// POST /api/users - Register a new account
///
/// Expected Input:
/// ```json
/// { "name": "string", "email": "string", "password": "string (6+ chars)" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let RegisterRequest { name, email, password } = payload;

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict(USER_EXISTS));
    }

    let avatar = gravatar_url(&email)?;
    let password = hash_password(password, state.bcrypt_cost).await?;

    let new_user = NewUser {
        name,
        email,
        password,
        avatar,
    };
    let user = match state.store.insert_user(new_user).await {
        Ok(user) => user,
        // lost a race with a concurrent registration for the same email
        Err(DatabaseError::Conflict(_)) => return Err(ApiError::conflict(USER_EXISTS)),
        Err(e) => return Err(e.into()),
    };

    let token = state.tokens.issue(user.id)?;
    tracing::info!(user_id = %user.id, "Registered user");

    Ok(Json(json!({ "token": token })))
}
