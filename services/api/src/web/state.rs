//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-request identity.

use crate::adapters::CdnAdapter;
use crate::config::Config;
use academy_core::domain::UserProfile;
use academy_core::ports::{CatalogStore, IdentityStore};
use academy_core::settings::SiteSettings;
use std::sync::Arc;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub settings: Arc<SiteSettings>,
    pub cdn: CdnAdapter,
    pub config: Arc<Config>,
}

//=========================================================================================
// CurrentUser (Specific to One Authenticated Request)
//=========================================================================================

/// The resolved identity for an authenticated request, inserted into request
/// extensions by the auth middleware.
///
/// `profile` is `None` when the profile lookup hit a transient store error:
/// "authenticated but profile still unknown", which is distinct from not
/// being authenticated at all.
#[derive(Clone)]
pub struct CurrentUser {
    pub uid: Uuid,
    pub email: String,
    pub profile: Option<UserProfile>,
}
