use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::users;

/// Session token lifetime: one working day.
pub const TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

/// Claims carried by an admin session token.
///
/// Signed HS256 with the server's `JWT_SECRET`. The `sub` field is the
/// user's database id; the profile fields let the UI render the session
/// without an extra lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's database id, as a string.
    pub sub: String,
    pub username: String,
    pub name: String,
    pub is_admin: bool,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: usize,
}

impl Claims {
    /// Extract the user id from the `sub` claim.
    pub fn user_id(&self) -> Result<i32, String> {
        self.sub
            .parse()
            .map_err(|e| format!("Invalid user id in sub claim: {e}"))
    }
}

/// Mint a session token for a freshly authenticated user.
pub fn issue_token(user: &users::Model, secret: &str) -> Result<String, String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        name: user.name.clone(),
        is_admin: user.is_admin,
        exp: (now + TOKEN_TTL_SECS) as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

/// Validate a session token and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
