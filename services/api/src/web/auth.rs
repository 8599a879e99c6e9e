//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, login, and logout.
//!
//! Signup performs three sequential, non-transactional writes: the identity,
//! the profile document, then a history entry. A failure partway leaves an
//! orphaned identity with no profile; that is recovered on next login by
//! profile synthesis, so it is not rolled back here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use academy_core::domain::{Role, UserProfile};
use academy_core::session::log_history;
use crate::web::forms::is_valid_email;
use crate::web::middleware::session_cookie;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub uid: Uuid,
    pub email: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Normalize, then required-field checks before any store write. The
    //    trimmed email is what gets stored everywhere, so a later login with
    //    the same (possibly padded) input looks up the same key.
    let email = req.email.trim();
    if req.username.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Username is required".to_string()));
    }
    if !is_valid_email(email) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter a valid email address".to_string(),
        ));
    }
    if req.password.len() < 6 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // 2. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create account".to_string(),
            )
        })?
        .to_string();

    // 3. Create the identity. This is the one place provider errors get
    //    translated to user-facing strings.
    let uid = state
        .identity
        .create_identity(email, req.username.trim(), &password_hash)
        .await
        .map_err(|e| {
            let message = e.to_string();
            if message.contains("duplicate") || message.contains("unique") {
                (
                    StatusCode::BAD_REQUEST,
                    "An account with this email already exists".to_string(),
                )
            } else {
                error!("Failed to create identity: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create account".to_string(),
                )
            }
        })?;

    // 4. Write the profile document with the default role
    let profile = UserProfile {
        uid,
        username: req.username.trim().to_string(),
        email: email.to_string(),
        role: Role::User,
        created_at: Utc::now(),
    };
    state.identity.create_profile(&profile).await.map_err(|e| {
        error!("Failed to write profile for {}: {:?}", uid, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create account".to_string(),
        )
    })?;

    // 5. Record the signup; history is best-effort and never fails the flow
    if let Err(e) = log_history(
        state.identity.as_ref(),
        Some(uid),
        "signup",
        "Account created",
        None,
    )
    .await
    {
        warn!("Failed to record signup history: {:?}", e);
    }

    // 6. Create auth session and cookie
    let (_, cookie) = mint_session(&state, uid).await?;

    let response = AuthResponse {
        uid,
        email: email.to_string(),
    };

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(response),
    ))
}

/// POST /auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Get credentials by email
    let creds = state
        .identity
        .get_credentials_by_email(req.email.trim())
        .await
        .map_err(|e| {
            warn!("Login lookup failed: {:?}", e);
            (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            )
        })?;

    // 2. Verify password
    let parsed_hash = PasswordHash::new(&creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication error".to_string(),
        )
    })?;

    let valid = Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid email or password".to_string(),
        ));
    }

    // 3. Record the login
    if let Err(e) = log_history(
        state.identity.as_ref(),
        Some(creds.uid),
        "login",
        "Signed in",
        None,
    )
    .await
    {
        warn!("Failed to record login history: {:?}", e);
    }

    // 4. Create auth session and cookie
    let (_, cookie) = mint_session(&state, creds.uid).await?;

    let response = AuthResponse {
        uid: creds.uid,
        email: creds.email,
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /auth/logout - Logout and invalidate session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Extract session cookie
    let session_id = session_cookie(&headers)
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?
        .to_string();

    // 2. Record the logout only if the session still resolves to a user
    if let Ok(identity) = state.identity.validate_auth_session(&session_id).await {
        if let Err(e) = log_history(
            state.identity.as_ref(),
            Some(identity.uid),
            "logout",
            "Signed out",
            None,
        )
        .await
        {
            warn!("Failed to record logout history: {:?}", e);
        }
    }

    // 3. Delete auth session from database
    state
        .identity
        .delete_auth_session(&session_id)
        .await
        .map_err(|e| {
            error!("Failed to delete auth session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to logout".to_string(),
            )
        })?;

    // 4. Clear cookie
    let cookie = "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0";

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie.to_string())]))
}

/// Mints a new auth session row and the matching Set-Cookie value.
async fn mint_session(
    state: &AppState,
    uid: Uuid,
) -> Result<(String, String), (StatusCode, String)> {
    let session_id = Uuid::new_v4().to_string();
    let ttl = Duration::days(state.config.session_ttl_days);
    let expires_at = Utc::now() + ttl;

    state
        .identity
        .create_auth_session(&session_id, uid, expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create auth session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session".to_string(),
            )
        })?;

    let cookie = format!(
        "session={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        session_id,
        ttl.num_seconds()
    );
    Ok((session_id, cookie))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testing::{test_state, MockIdentity};
    use academy_core::ports::IdentityStore;
    use std::sync::Arc;

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            username: "Meera".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_stores_the_trimmed_email_everywhere() {
        let identity = Arc::new(MockIdentity::default());
        let state = test_state(identity.clone());

        let result = signup_handler(State(state), Json(signup(" meera@example.in "))).await;
        assert!(result.is_ok());

        // The credential row matches the key login looks up.
        let creds = identity
            .get_credentials_by_email("meera@example.in")
            .await
            .unwrap();
        assert_eq!(creds.email, "meera@example.in");

        // The profile document carries the same address.
        let profile = identity.get_profile(creds.uid).await.unwrap().unwrap();
        assert_eq!(profile.email, "meera@example.in");
    }

    #[tokio::test]
    async fn a_padded_signup_email_can_log_back_in() {
        let identity = Arc::new(MockIdentity::default());
        let state = test_state(identity);

        signup_handler(State(state.clone()), Json(signup(" meera@example.in ")))
            .await
            .map(|_| ())
            .unwrap();

        let login = login_handler(
            State(state),
            Json(LoginRequest {
                email: " meera@example.in ".to_string(),
                password: "secret123".to_string(),
            }),
        )
        .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn a_wrong_password_is_rejected() {
        let identity = Arc::new(MockIdentity::default());
        let state = test_state(identity);

        signup_handler(State(state.clone()), Json(signup("meera@example.in")))
            .await
            .map(|_| ())
            .unwrap();

        let login = login_handler(
            State(state),
            Json(LoginRequest {
                email: "meera@example.in".to_string(),
                password: "wrong-password".to_string(),
            }),
        )
        .await;
        let (status, _) = login.map(|_| ()).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
