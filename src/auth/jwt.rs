use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session tokens are long-lived; the client caches them in durable storage
/// and there is no refresh flow.
const TOKEN_EXPIRY_DAYS: i64 = 30;

/// Claims embedded in every session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id
    pub sub: Uuid,
    /// Expiration time (UTC Unix timestamp)
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp)
    pub iat: i64,
}

/// Signs an HS256 session token for the given user
pub fn generate_token(user_id: Uuid, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validates a session token and returns its claims.
///
/// Signature and expiration are checked; anything invalid is an error.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-long-enough-for-hmac";

    #[test]
    fn test_generate_and_validate_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, SECRET).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = generate_token(Uuid::new_v4(), SECRET).unwrap();
        assert!(validate_token(&token, "different-secret").is_err());
    }

    #[test]
    fn test_expired_token_fails() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            // Expired well past the default 60 second leeway
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(validate_token("not-a-jwt", SECRET).is_err());
    }
}
