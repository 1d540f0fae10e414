use md5::{Digest, Md5};
use url::Url;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar/";

/// Gravatar URL for an email address: 200px, "pg" rating, mystery-man fallback.
pub fn gravatar_url(email: &str) -> Result<String, url::ParseError> {
    let normalized = email.trim().to_lowercase();
    let hash = hex::encode(Md5::digest(normalized.as_bytes()));

    let url = Url::parse_with_params(
        &format!("{}{}", GRAVATAR_BASE, hash),
        &[("s", "200"), ("r", "pg"), ("d", "mm")],
    )?;
    Ok(url.into())
}
