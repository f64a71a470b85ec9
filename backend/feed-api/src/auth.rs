/// Session token validation
///
/// Sessions are issued by the external identity provider; this service only
/// validates them. Tokens are HMAC-signed JWTs (HS256) over a secret shared
/// with the provider. The decoding key is loaded once at startup and never
/// modified; this service holds no signing path.
use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a session token. `sub` is the user id as a UUID string.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

static SESSION_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Install the shared session secret.
///
/// Must be called during startup before any token validation. Can only be
/// called once; subsequent calls return an error.
pub fn initialize_session_validation(secret: &str) -> Result<()> {
    if secret.trim().is_empty() {
        return Err(anyhow!("session secret must not be empty"));
    }

    SESSION_DECODING_KEY
        .set(DecodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("session validation key already initialized"))
}

/// Validate a session token and return its claims.
///
/// Fails if the key was never installed, the signature does not verify, the
/// algorithm is not HS256, or the token is expired.
pub fn validate_session_token(token: &str) -> Result<TokenData<SessionClaims>> {
    let key = SESSION_DECODING_KEY
        .get()
        .ok_or_else(|| anyhow!("session validation key not initialized"))?;

    let mut validation = Validation::new(SESSION_ALGORITHM);
    validation.validate_exp = true;

    decode::<SessionClaims>(token, key, &validation).map_err(|err| anyhow!("invalid token: {err}"))
}
