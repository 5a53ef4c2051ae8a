use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use stockroom_core::User;

use super::identity::AuthenticatedUser;

/// JWT claims embedded in issued tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: i64,
    /// Email of the subject, for display without a store round trip.
    pub email: String,
    /// Expiry (seconds since epoch).
    pub exp: usize,
}

/// Manages JWT issuance and validation.
///
/// Tokens are stateless: verification checks signature and expiry only,
/// there is no revocation list.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: u64,
}

impl JwtManager {
    pub fn new(secret: &str, expiry_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        }
    }

    /// Issue a JWT for the given user, returning the token and its
    /// lifetime in seconds.
    pub fn issue_token(&self, user: &User) -> Result<(String, u64), String> {
        #[allow(clippy::cast_possible_truncation)]
        let exp = jsonwebtoken::get_current_timestamp() as usize + self.expiry_seconds as usize;

        let claims = Claims {
            sub: user.user_id,
            email: user.email.clone(),
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| format!("JWT encoding failed: {e}"))?;

        Ok((token, self.expiry_seconds))
    }

    /// Validate a JWT's signature and expiry, returning the caller it
    /// identifies.
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, String> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| format!("invalid token: {e}"))?;

        let claims = token_data.claims;
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    fn sample_user() -> User {
        User {
            user_id: 7,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            user_image_url: String::new(),
            password_hash: "$argon2$fake".into(),
            verified: false,
            created: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let manager = JwtManager::new("test-secret", 3600);
        let (token, expires_in) = manager.issue_token(&sample_user()).unwrap();
        assert_eq!(expires_in, 3600);

        let identity = manager.validate_token(&token).unwrap();
        assert_eq!(identity.user_id, 7);
        assert_eq!(identity.email, "ada@example.com");
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);

        let (token, _) = issuer.issue_token(&sample_user()).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let manager = JwtManager::new("test-secret", 3600);
        assert!(manager.validate_token("not.a.jwt").is_err());
    }
}
