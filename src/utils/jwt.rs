use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode, errors::ErrorKind,
};

use crate::errors::{Error, Result};

pub const ISSUER: &str = "chronos-hr";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub id: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
}

impl Claims {
    pub fn new(id: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            exp: (now + Duration::minutes(ttl_minutes)).timestamp() as usize,
            iat: now.timestamp() as usize,
            iss: ISSUER.to_string(),
        }
    }
}

pub fn encode_jwt(claim: &Claims, secret: &str) -> Result<String> {
    let token = encode(
        &Header::default(),
        claim,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<TokenData<Claims>> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => Error::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let claims = Claims::new("profiles:abc".to_string(), 60);
        let token = encode_jwt(&claims, "secret").unwrap();
        let decoded = decode_jwt(&token, "secret").unwrap();
        assert_eq!(decoded.claims.id, "profiles:abc");
        assert_eq!(decoded.claims.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new("profiles:abc".to_string(), 60);
        let token = encode_jwt(&claims, "secret").unwrap();
        assert!(matches!(
            decode_jwt(&token, "other").unwrap_err(),
            Error::InvalidToken
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::new("profiles:abc".to_string(), -120);
        let token = encode_jwt(&claims, "secret").unwrap();
        assert!(matches!(
            decode_jwt(&token, "secret").unwrap_err(),
            Error::TokenExpired
        ));
    }
}
