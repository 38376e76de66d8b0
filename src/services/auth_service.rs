use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::AppError;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: i64, // issued at
    pub exp: i64, // expiration
    pub jti: String,
}

/// Signing material shared by the issuer and the verifier.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Signs a token asserting `email`, valid for the configured TTL from now.
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = Duration::try_hours(self.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::ConfigError(format!("Token TTL out of range: {}h", self.ttl_hours)))?;
        self.sign(Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    fn sign(&self, claims: Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::ConfigError(format!("Failed to generate token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Forbidden(format!("Invalid token: {}", e)))
    }
}

/// Second whitespace-separated word of an `Authorization` value (`Bearer <token>`).
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

/// Missing header is `Unauthorized`; anything unusable after that is `Forbidden`.
pub fn verify_request(headers: &HeaderMap, keys: &JwtKeys) -> Result<Claims, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("UnAuthorized access".into()))?;

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Forbidden("Forbidden access".into()))?;

    keys.verify(token)
}
