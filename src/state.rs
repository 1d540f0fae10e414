use std::sync::Arc;

use crate::auth::{TokenError, TokenKeys};
use crate::config::SecurityConfig;
use crate::database::Store;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenKeys,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, security: &SecurityConfig) -> Result<Self, TokenError> {
        Ok(Self {
            store,
            tokens: TokenKeys::new(&security.jwt_secret, security.jwt_expires_in_secs)?,
            bcrypt_cost: security.bcrypt_cost,
        })
    }
}
