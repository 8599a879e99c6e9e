//! services/api/src/web/middleware.rs
//!
//! Authentication and admin-gate middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use academy_core::domain::{Role, UserProfile};
use academy_core::session::resolve_profile;
use crate::web::state::{AppState, CurrentUser};

/// Pulls the session id out of the request's cookie header, if present.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|c| {
        let c = c.trim();
        c.strip_prefix("session=")
    })
}

/// Middleware that validates the auth session cookie and resolves the
/// current user's profile.
///
/// If valid, inserts a [`CurrentUser`] into request extensions for handlers
/// to use. If invalid or missing, returns 401 Unauthorized (the API
/// equivalent of redirecting an anonymous visitor to the login page).
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let session_id = session_cookie(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let identity = state
        .identity
        .validate_auth_session(session_id)
        .await
        .map_err(|e| {
            warn!("Failed to validate auth session: {:?}", e);
            StatusCode::UNAUTHORIZED
        })?;

    // A failed profile lookup does NOT fail the request; the user stays
    // authenticated with an unknown profile.
    let profile = resolve_profile(state.identity.as_ref(), &identity).await;

    req.extensions_mut().insert(CurrentUser {
        uid: identity.uid,
        email: identity.email,
        profile,
    });

    Ok(next.run(req).await)
}

/// Whether the admin subtree is open to this profile: admins pass, and so
/// does a still-unknown profile (the lookup may have transiently failed).
/// A loaded non-admin profile is denied.
pub fn admin_allows(profile: Option<&UserProfile>) -> bool {
    match profile {
        None => true,
        Some(p) => p.role == Role::Admin,
    }
}

/// Middleware for the `/admin` subtree. Runs after `require_auth`; an
/// authenticated non-admin gets an access-denied response rather than a
/// redirect. This is a UX gate, not the security boundary - the store's own
/// access rules are what actually protect the data.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or((StatusCode::UNAUTHORIZED, "Not signed in".to_string()))?;

    if !admin_allows(user.profile.as_ref()) {
        return Err((
            StatusCode::FORBIDDEN,
            "Access denied. This area is for academy administrators.".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::state::AppState;
    use crate::web::testing::{test_state, MockIdentity, StoredIdentity};
    use academy_core::domain::UserProfile;
    use axum::{
        body::Body,
        http::Request,
        middleware::{from_fn, from_fn_with_state},
        routing::get,
        Router,
    };
    use chrono::Utc;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn profile_with(role: Role) -> UserProfile {
        UserProfile {
            uid: Uuid::new_v4(),
            username: "someone".to_string(),
            email: "someone@example.in".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn admin_profile_is_allowed() {
        assert!(admin_allows(Some(&profile_with(Role::Admin))));
    }

    #[test]
    fn non_admin_profile_is_denied() {
        assert!(!admin_allows(Some(&profile_with(Role::User))));
    }

    #[test]
    fn unknown_profile_is_allowed_through() {
        // Transient lookup failure leaves the profile unknown; the gate
        // lets the request through rather than locking an admin out.
        assert!(admin_allows(None));
    }

    #[test]
    fn cookie_parsing_finds_the_session_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; session=abc123; lang=en".parse().unwrap(),
        );
        assert_eq!(session_cookie(&headers), Some("abc123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }

    /// A one-route router protected the same way the real admin subtree is:
    /// `require_admin` inside, `require_auth` outside.
    fn gated_app(state: AppState) -> Router {
        Router::new()
            .route("/admin/ping", get(|| async { "pong" }))
            .route_layer(from_fn(require_admin))
            .route_layer(from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    fn seed_user(identity: &MockIdentity, role: Role, session_id: &str) -> Uuid {
        let uid = Uuid::new_v4();
        identity.identities.lock().unwrap().push(StoredIdentity {
            uid,
            email: "someone@example.in".to_string(),
            display_name: "Someone".to_string(),
            hashed_password: String::new(),
        });
        identity.profiles.lock().unwrap().insert(
            uid,
            UserProfile {
                uid,
                username: "Someone".to_string(),
                email: "someone@example.in".to_string(),
                role,
                created_at: Utc::now(),
            },
        );
        identity
            .sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), uid);
        uid
    }

    fn request(cookie: Option<&str>) -> Request<Body> {
        let builder = Request::builder().uri("/admin/ping");
        let builder = match cookie {
            Some(c) => builder.header(header::COOKIE, format!("session={}", c)),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn anonymous_requests_are_rejected_with_401() {
        let app = gated_app(test_state(Arc::new(MockIdentity::default())));

        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn a_stale_session_cookie_is_rejected_with_401() {
        // No session rows exist, so the cookie no longer resolves.
        let app = gated_app(test_state(Arc::new(MockIdentity::default())));

        let response = app.oneshot(request(Some("long-gone"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn an_admin_session_passes_both_gates() {
        let identity = Arc::new(MockIdentity::default());
        seed_user(&identity, Role::Admin, "abc123");
        let app = gated_app(test_state(identity));

        let response = app.oneshot(request(Some("abc123"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn a_signed_in_non_admin_is_denied_with_403() {
        let identity = Arc::new(MockIdentity::default());
        seed_user(&identity, Role::User, "abc123");
        let app = gated_app(test_state(identity));

        let response = app.oneshot(request(Some("abc123"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
