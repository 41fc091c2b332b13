use crate::db::models::UserId;
use crate::error::StudyError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub id: UserId,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies HMAC-signed session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenSigner {
    keys: Arc<Keys>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn issue(&self, id: UserId, email: &str) -> Result<String, StudyError> {
        let now = Utc::now();
        let claims = Claims {
            id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, StudyError> {
        Ok(encode(
            &Header::new(TOKEN_ALGORITHM),
            claims,
            &self.keys.encoding,
        )?)
    }

    /// Check signature and expiry. No leeway: a token past `exp` is rejected.
    pub fn verify(&self, token: &str) -> Result<Claims, StudyError> {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        let data = decode::<Claims>(token, &self.keys.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_identity() {
        let signer = TokenSigner::new("secret", 86_400);
        let token = signer.issue(7, "a@b.c").unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "a@b.c");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = TokenSigner::new("secret", 86_400);
        let now = Utc::now().timestamp();
        let token = signer
            .sign(&Claims {
                id: 1,
                email: "a@b.c".into(),
                iat: now - 86_410,
                exp: now - 10,
            })
            .unwrap();
        assert!(matches!(signer.verify(&token), Err(StudyError::Token(_))));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let ours = TokenSigner::new("secret", 60);
        let theirs = TokenSigner::new("other", 60);
        let token = theirs.issue(1, "a@b.c").unwrap();
        assert!(ours.verify(&token).is_err());
        assert!(ours.verify("not-a-token").is_err());
    }
}
