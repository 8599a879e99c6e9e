//! crates/academy_core/src/domain.rs
//!
//! Defines the core data structures for the academy site: singleton settings
//! documents, the user/session model, and the content collections managed
//! from the admin console. Wire names are camelCase to match the document
//! shapes the site has always stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

//=========================================================================================
// Singleton settings documents
//=========================================================================================

/// Site-wide contact details shown in the footer, contact page and
/// WhatsApp call-to-action buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub whatsapp_number: String,
    pub phone: String,
    /// Comma-joined list of addresses, kept as a single display string.
    pub email: String,
    pub address: String,
    pub hours: String,
    pub instagram_url: String,
    pub youtube_url: String,
    pub facebook_url: String,
}

/// Homepage hero carousel content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub heading: String,
    pub subheading: String,
    pub images: Vec<String>,
}

/// The stat counters rendered on the homepage ("500+ Students Trained" etc).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub students_trained: String,
    pub years_of_legacy: String,
    pub art_forms: String,
    pub performances: String,
}

//=========================================================================================
// Users, sessions and history
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Unrecognised role strings fall back to the least-privileged role.
    pub fn parse(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// The profile document stored for a signed-up user, keyed by the
/// identity uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds the stand-in profile used when an authenticated identity has
    /// no stored profile document (e.g. after a partially failed signup).
    /// Absence of a profile never blocks login.
    pub fn synthesized(uid: Uuid, display_name: Option<&str>, email: &str) -> Self {
        Self {
            uid,
            username: display_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or("User")
                .to_string(),
            email: email.to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }
}

// Only used internally for login - contains sensitive data.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub uid: Uuid,
    pub email: String,
    pub hashed_password: String,
}

/// What a valid session cookie resolves to: enough identity to synthesize a
/// profile when no profile document exists.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub uid: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}

/// An append-only audit record of a user action (login/logout/signup/...).
/// Entries are never mutated or deleted by the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub uid: Uuid,
    pub action: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonValue>,
}

//=========================================================================================
// Content collections
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Active,
    Draft,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Active => "active",
            CourseStatus::Draft => "draft",
        }
    }

    pub fn parse(s: &str) -> CourseStatus {
        match s {
            "active" => CourseStatus::Active,
            _ => CourseStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub badge: String,
    pub badge_color: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    pub status: CourseStatus,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub category_label: String,
    pub description: String,
    /// Display string ("₹1,500"), not a numeric currency type.
    pub price: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub stock_status: String,
    pub whatsapp_enquiry: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: Uuid,
    pub url: String,
    /// CDN reference; empty for externally hosted URLs.
    pub public_id: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub quote: String,
    pub name: String,
    pub course: String,
    /// 1-5.
    pub stars: i16,
    /// Explicit sort key, not insertion order.
    pub order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    New,
    Contacted,
    Enrolled,
    Closed,
    Pending,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Enrolled => "enrolled",
            EnquiryStatus::Closed => "closed",
            EnquiryStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> EnquiryStatus {
        match s {
            "contacted" => EnquiryStatus::Contacted,
            "enrolled" => EnquiryStatus::Enrolled,
            "closed" => EnquiryStatus::Closed,
            "pending" => EnquiryStatus::Pending,
            _ => EnquiryStatus::New,
        }
    }
}

/// A contact-form submission. Created by the public flow with status `new`;
/// afterwards only status and notes are mutated, and only by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub location: String,
    pub course: String,
    pub experience_level: String,
    #[serde(default)]
    pub batch_preference: Vec<String>,
    pub message: String,
    pub heard_from: String,
    pub enquiry_for: String,
    pub status: EnquiryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
