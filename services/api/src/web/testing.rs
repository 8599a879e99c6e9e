//! services/api/src/web/testing.rs
//!
//! In-memory port implementations and an `AppState` builder shared by the
//! handler and middleware tests. The identity store is a real (if tiny)
//! store so auth flows can be exercised end to end; the catalog and
//! settings stubs are inert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::Level;
use uuid::Uuid;

use academy_core::domain::{
    Course, CourseStatus, Enquiry, EnquiryStatus, Faculty, GalleryItem, HistoryEntry, Product,
    SessionIdentity, Testimonial, UserCredentials, UserProfile,
};
use academy_core::ports::{
    CatalogStore, IdentityStore, PortError, PortResult, SettingsSource,
};
use academy_core::settings::SiteSettings;
use crate::adapters::CdnAdapter;
use crate::config::Config;
use crate::web::state::AppState;

pub struct StoredIdentity {
    pub uid: Uuid,
    pub email: String,
    pub display_name: String,
    pub hashed_password: String,
}

/// An in-memory identity store: identities, sessions, profiles and history
/// all live in mutex-guarded maps the tests can seed and inspect directly.
#[derive(Default)]
pub struct MockIdentity {
    pub identities: Mutex<Vec<StoredIdentity>>,
    pub sessions: Mutex<HashMap<String, Uuid>>,
    pub profiles: Mutex<HashMap<Uuid, UserProfile>>,
    pub history: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl IdentityStore for MockIdentity {
    async fn create_identity(
        &self,
        email: &str,
        display_name: &str,
        hashed_password: &str,
    ) -> PortResult<Uuid> {
        let mut identities = self.identities.lock().unwrap();
        if identities.iter().any(|i| i.email == email) {
            return Err(PortError::Unexpected(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        let uid = Uuid::new_v4();
        identities.push(StoredIdentity {
            uid,
            email: email.to_string(),
            display_name: display_name.to_string(),
            hashed_password: hashed_password.to_string(),
        });
        Ok(uid)
    }

    async fn get_credentials_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.email == email)
            .map(|i| UserCredentials {
                uid: i.uid,
                email: i.email.clone(),
                hashed_password: i.hashed_password.clone(),
            })
            .ok_or_else(|| PortError::NotFound(format!("identity {}", email)))
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        uid: Uuid,
        _expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), uid);
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionIdentity> {
        let uid = *self
            .sessions
            .lock()
            .unwrap()
            .get(session_id)
            .ok_or(PortError::Unauthorized)?;
        self.identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.uid == uid)
            .map(|i| SessionIdentity {
                uid: i.uid,
                email: i.email.clone(),
                display_name: Some(i.display_name.clone()),
            })
            .ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn get_profile(&self, uid: Uuid) -> PortResult<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(&uid).cloned())
    }

    async fn create_profile(&self, profile: &UserProfile) -> PortResult<()> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.uid, profile.clone());
        Ok(())
    }

    async fn append_history(&self, entry: &HistoryEntry) -> PortResult<()> {
        self.history.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn history_for_user(&self, uid: Uuid) -> PortResult<Vec<HistoryEntry>> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.uid == uid)
            .cloned()
            .collect())
    }
}

/// A catalog that holds nothing and accepts everything.
pub struct StubCatalog;

#[async_trait]
impl CatalogStore for StubCatalog {
    async fn list_courses(
        &self,
        _status: Option<CourseStatus>,
        _category: Option<&str>,
    ) -> PortResult<Vec<Course>> {
        Ok(Vec::new())
    }
    async fn create_course(&self, _course: &Course) -> PortResult<()> {
        Ok(())
    }
    async fn update_course(&self, _course: &Course) -> PortResult<()> {
        Ok(())
    }
    async fn delete_course(&self, _id: Uuid) -> PortResult<()> {
        Ok(())
    }

    async fn list_products(&self, _category: Option<&str>) -> PortResult<Vec<Product>> {
        Ok(Vec::new())
    }
    async fn create_product(&self, _product: &Product) -> PortResult<()> {
        Ok(())
    }
    async fn update_product(&self, _product: &Product) -> PortResult<()> {
        Ok(())
    }
    async fn delete_product(&self, _id: Uuid) -> PortResult<()> {
        Ok(())
    }

    async fn list_gallery(&self, _category: Option<&str>) -> PortResult<Vec<GalleryItem>> {
        Ok(Vec::new())
    }
    async fn create_gallery_item(&self, _item: &GalleryItem) -> PortResult<()> {
        Ok(())
    }
    async fn delete_gallery_item(&self, _id: Uuid) -> PortResult<()> {
        Ok(())
    }

    async fn list_testimonials(&self) -> PortResult<Vec<Testimonial>> {
        Ok(Vec::new())
    }
    async fn create_testimonial(&self, _testimonial: &Testimonial) -> PortResult<()> {
        Ok(())
    }
    async fn update_testimonial(&self, _testimonial: &Testimonial) -> PortResult<()> {
        Ok(())
    }
    async fn delete_testimonial(&self, _id: Uuid) -> PortResult<()> {
        Ok(())
    }

    async fn list_faculty(&self, _only_active: bool) -> PortResult<Vec<Faculty>> {
        Ok(Vec::new())
    }
    async fn create_faculty(&self, _faculty: &Faculty) -> PortResult<()> {
        Ok(())
    }
    async fn update_faculty(&self, _faculty: &Faculty) -> PortResult<()> {
        Ok(())
    }
    async fn delete_faculty(&self, _id: Uuid) -> PortResult<()> {
        Ok(())
    }

    async fn create_enquiry(&self, _enquiry: &Enquiry) -> PortResult<()> {
        Ok(())
    }
    async fn list_enquiries(&self, _status: Option<EnquiryStatus>) -> PortResult<Vec<Enquiry>> {
        Ok(Vec::new())
    }
    async fn update_enquiry_status(
        &self,
        _id: Uuid,
        _status: EnquiryStatus,
        _notes: Option<&str>,
    ) -> PortResult<()> {
        Ok(())
    }
}

pub struct StubSettings;

#[async_trait]
impl SettingsSource for StubSettings {
    async fn fetch_setting(&self, _key: &str) -> PortResult<Option<JsonValue>> {
        Ok(None)
    }

    async fn put_setting(&self, _key: &str, _value: &JsonValue) -> PortResult<()> {
        Ok(())
    }
}

/// Builds an `AppState` around the given identity store, with everything
/// else stubbed out.
pub fn test_state(identity: Arc<dyn IdentityStore>) -> AppState {
    AppState {
        identity,
        catalog: Arc::new(StubCatalog) as Arc<dyn CatalogStore>,
        settings: Arc::new(SiteSettings::new(
            Arc::new(StubSettings) as Arc<dyn SettingsSource>
        )),
        cdn: CdnAdapter::new("kalanjali".to_string(), "gallery_unsigned".to_string()),
        config: Arc::new(Config {
            bind_address: "127.0.0.1:0".parse().unwrap(),
            database_url: "postgres://unused".to_string(),
            log_level: Level::INFO,
            cors_origin: "http://localhost:5173".to_string(),
            cdn_cloud_name: "kalanjali".to_string(),
            cdn_upload_preset: "gallery_unsigned".to_string(),
            session_ttl_days: 30,
        }),
    }
}
