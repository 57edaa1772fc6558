use jsonwebtoken::{decode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::jwt::Claims;

pub fn jwt_encode(username: &str, secret: &str, ttl_hours: u64) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp() as usize;
    let ttl_secs = usize::try_from(ttl_hours)
        .unwrap_or(usize::MAX)
        .saturating_mul(60 * 60);
    let claims = Claims {
        sub: username.to_string(),
        iat: now,
        exp: now.saturating_add(ttl_secs),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn jwt_decode(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(decoded.claims)
}
