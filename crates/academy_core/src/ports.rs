//! crates/academy_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete document store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::domain::{
    Course, CourseStatus, Enquiry, EnquiryStatus, Faculty, GalleryItem, HistoryEntry, Product,
    SessionIdentity, Testimonial, UserCredentials, UserProfile,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// One-shot reads and writes of the named singleton settings documents
/// ("contactInfo", "hero", "stats"). The value is the raw stored document;
/// merging with static defaults happens in the settings accessor, not here.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// Returns `Ok(None)` when no document exists under the key, which is
    /// distinct from a read failure.
    async fn fetch_setting(&self, key: &str) -> PortResult<Option<JsonValue>>;

    async fn put_setting(&self, key: &str, value: &JsonValue) -> PortResult<()>;
}

/// Identities, login sessions, profile documents and the per-user
/// activity history.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Creates the identity record and returns its uid. Does NOT create the
    /// profile document; signup writes that separately (and a failure in
    /// between leaves an orphaned identity, recovered by profile synthesis
    /// on next login).
    async fn create_identity(
        &self,
        email: &str,
        display_name: &str,
        hashed_password: &str,
    ) -> PortResult<Uuid>;

    async fn get_credentials_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn create_auth_session(
        &self,
        session_id: &str,
        uid: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Resolves a session cookie value to the identity it belongs to,
    /// rejecting expired sessions.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionIdentity>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    /// `Ok(None)` means the identity has no stored profile document; callers
    /// synthesize a default-role profile in that case.
    async fn get_profile(&self, uid: Uuid) -> PortResult<Option<UserProfile>>;

    async fn create_profile(&self, profile: &UserProfile) -> PortResult<()>;

    /// Appends one history entry. History is append-only; there is no
    /// update or delete counterpart.
    async fn append_history(&self, entry: &HistoryEntry) -> PortResult<()>;

    /// Entries for one user, newest first.
    async fn history_for_user(&self, uid: Uuid) -> PortResult<Vec<HistoryEntry>>;
}

/// The content collections backing the public pages and admin panels.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Courses ---
    async fn list_courses(
        &self,
        status: Option<CourseStatus>,
        category: Option<&str>,
    ) -> PortResult<Vec<Course>>;
    async fn create_course(&self, course: &Course) -> PortResult<()>;
    async fn update_course(&self, course: &Course) -> PortResult<()>;
    async fn delete_course(&self, id: Uuid) -> PortResult<()>;

    // --- Products ---
    async fn list_products(&self, category: Option<&str>) -> PortResult<Vec<Product>>;
    async fn create_product(&self, product: &Product) -> PortResult<()>;
    async fn update_product(&self, product: &Product) -> PortResult<()>;
    async fn delete_product(&self, id: Uuid) -> PortResult<()>;

    // --- Gallery ---
    async fn list_gallery(&self, category: Option<&str>) -> PortResult<Vec<GalleryItem>>;
    async fn create_gallery_item(&self, item: &GalleryItem) -> PortResult<()>;
    async fn delete_gallery_item(&self, id: Uuid) -> PortResult<()>;

    // --- Testimonials ---
    async fn list_testimonials(&self) -> PortResult<Vec<Testimonial>>;
    async fn create_testimonial(&self, testimonial: &Testimonial) -> PortResult<()>;
    async fn update_testimonial(&self, testimonial: &Testimonial) -> PortResult<()>;
    async fn delete_testimonial(&self, id: Uuid) -> PortResult<()>;

    // --- Faculty ---
    async fn list_faculty(&self, only_active: bool) -> PortResult<Vec<Faculty>>;
    async fn create_faculty(&self, faculty: &Faculty) -> PortResult<()>;
    async fn update_faculty(&self, faculty: &Faculty) -> PortResult<()>;
    async fn delete_faculty(&self, id: Uuid) -> PortResult<()>;

    // --- Enquiries ---
    async fn create_enquiry(&self, enquiry: &Enquiry) -> PortResult<()>;
    async fn list_enquiries(&self, status: Option<EnquiryStatus>) -> PortResult<Vec<Enquiry>>;
    /// Admins may change status and notes only; everything else is fixed at
    /// submission time. Enquiries are never deleted.
    async fn update_enquiry_status(
        &self,
        id: Uuid,
        status: EnquiryStatus,
        notes: Option<&str>,
    ) -> PortResult<()>;
}
