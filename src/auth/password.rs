use thiserror::Error;
use tokio::task::spawn_blocking;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted bcrypt hash of `plain` at the given cost.
///
/// bcrypt is CPU bound, so the work runs on the blocking pool.
pub async fn hash_password(plain: String, cost: u32) -> Result<String, PasswordError> {
    let hashed = spawn_blocking(move || bcrypt::hash(plain, cost)).await??;
    Ok(hashed)
}
