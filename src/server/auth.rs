use super::error::{AppError, AppResult};
use super::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose};
use std::collections::HashMap;
use tracing::debug;

/// User account
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    password_hash: String,
}

impl User {
    /// Creates a new user
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Returns the username
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Name of the authenticated caller, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Authentication manager
///
/// Holds the accounts allowed to use the boat store. Any authenticated user
/// may do everything; there are no roles.
pub struct AuthManager {
    users: HashMap<String, User>,
}

impl AuthManager {
    pub const DEFAULT_ADMIN_USERNAME: &'static str = "admin";
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "hunter2";

    /// Creates a manager whose only account is the administrator, hashed at `cost`
    pub fn with_admin(username: &str, password: &str, cost: u32) -> AppResult<Self> {
        let mut users = HashMap::new();
        let admin_user = User::new(username.to_string(), Self::hash_password(password, cost)?);
        users.insert(username.to_string(), admin_user);

        Ok(Self { users })
    }

    /// Hashes a password using bcrypt
    ///
    /// Each hash includes a random salt, so the same password will produce different hashes.
    fn hash_password(password: &str, cost: u32) -> AppResult<String> {
        bcrypt::hash(password, cost).map_err(|e| AppError::internal(e.to_string()))
    }

    /// Verifies password against bcrypt hash
    fn verify_password(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Authenticates a user
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<&User> {
        let user = self.users.get(username).ok_or(AppError::Unauthorized)?;

        if !Self::verify_password(password, &user.password_hash) {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }
}

/// Splits an `Authorization: Basic ...` header value into username and password
pub fn parse_basic_authorization(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Rejects every request without valid Basic credentials
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let credentials = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_authorization);

    let Some((username, password)) = credentials else {
        debug!(path = %request.uri().path(), "request without basic credentials");
        return Err(AppError::Unauthorized);
    };

    let user = state.auth.authenticate(&username, &password)?;
    request
        .extensions_mut()
        .insert(AuthenticatedUser(user.username().to_string()));

    Ok(next.run(request).await)
}
