//! services/api/src/web/public.rs
//!
//! Handlers for the public site pages and the master definition for the
//! OpenAPI specification.
//!
//! Read paths never surface an error: settings fall back to their static
//! defaults and listings fall back to an empty list (testimonials fall back
//! to the default set), with the failure logged and nothing else. The one
//! public write - the contact-form enquiry - validates synchronously before
//! touching the store.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use academy_core::defaults;
use academy_core::domain::{
    ContactInfo, Course, CourseStatus, Enquiry, EnquiryStatus, HeroContent, SiteStats,
};
use crate::web::forms::{is_valid_email, is_valid_indian_phone, FieldError};
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        submit_enquiry_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        crate::web::admin::list_courses_handler,
        crate::web::admin::create_course_handler,
        crate::web::admin::update_course_handler,
        crate::web::admin::delete_course_handler,
        crate::web::admin::list_products_handler,
        crate::web::admin::create_product_handler,
        crate::web::admin::update_product_handler,
        crate::web::admin::delete_product_handler,
        crate::web::admin::list_gallery_handler,
        crate::web::admin::create_gallery_item_handler,
        crate::web::admin::delete_gallery_item_handler,
        crate::web::admin::upload_config_handler,
        crate::web::admin::list_testimonials_handler,
        crate::web::admin::create_testimonial_handler,
        crate::web::admin::update_testimonial_handler,
        crate::web::admin::delete_testimonial_handler,
        crate::web::admin::list_faculty_handler,
        crate::web::admin::create_faculty_handler,
        crate::web::admin::update_faculty_handler,
        crate::web::admin::delete_faculty_handler,
        crate::web::admin::list_enquiries_handler,
        crate::web::admin::update_enquiry_handler,
        crate::web::admin::export_enquiries_handler,
        crate::web::admin::put_setting_handler,
        crate::web::admin::history_handler,
    ),
    components(
        schemas(
            EnquiryRequest,
            EnquiryResponse,
            FieldError,
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            crate::web::admin::CoursePayload,
            crate::web::admin::ProductPayload,
            crate::web::admin::GalleryPayload,
            crate::web::admin::TestimonialPayload,
            crate::web::admin::FacultyPayload,
            crate::web::admin::EnquiryUpdate,
            crate::adapters::cdn::UploadTarget,
        )
    ),
    tags(
        (name = "Academy Site API", description = "Public pages and admin console for the academy website.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Settings (read-through cache, never errors)
//=========================================================================================

pub async fn contact_info_handler(State(state): State<AppState>) -> Json<ContactInfo> {
    Json(state.settings.get::<ContactInfo>().await)
}

pub async fn hero_handler(State(state): State<AppState>) -> Json<HeroContent> {
    Json(state.settings.get::<HeroContent>().await)
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<SiteStats> {
    Json(state.settings.get::<SiteStats>().await)
}

//=========================================================================================
// Public Listings
//=========================================================================================

#[derive(Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

/// GET /api/courses - active courses, optionally filtered by category.
pub async fn list_courses_handler(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Json<Vec<Course>> {
    let courses = state
        .catalog
        .list_courses(Some(CourseStatus::Active), filter.category.as_deref())
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to list courses: {:?}", e);
            Vec::new()
        });
    Json(courses)
}

/// Picks the homepage selection: at most `limit` courses with featured ones
/// prioritized over the rest.
pub fn featured_selection(courses: Vec<Course>, limit: usize) -> Vec<Course> {
    let mut ordered = courses;
    ordered.sort_by_key(|c| !c.featured);
    ordered.truncate(limit);
    ordered
}

/// GET /api/courses/featured - the "Explore Our Sacred Arts" homepage strip.
pub async fn featured_courses_handler(State(state): State<AppState>) -> Json<Vec<Course>> {
    let courses = state
        .catalog
        .list_courses(Some(CourseStatus::Active), None)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to list featured courses: {:?}", e);
            Vec::new()
        });
    Json(featured_selection(courses, 3))
}

pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Json<Vec<academy_core::domain::Product>> {
    let products = state
        .catalog
        .list_products(filter.category.as_deref())
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to list products: {:?}", e);
            Vec::new()
        });
    Json(products)
}

pub async fn list_gallery_handler(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Json<Vec<academy_core::domain::GalleryItem>> {
    let items = state
        .catalog
        .list_gallery(filter.category.as_deref())
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to list gallery: {:?}", e);
            Vec::new()
        });
    Json(items)
}

/// GET /api/testimonials - ordered by their explicit sort key. An empty or
/// failed read falls back to the default testimonials so the section always
/// renders something.
pub async fn list_testimonials_handler(
    State(state): State<AppState>,
) -> Json<Vec<academy_core::domain::Testimonial>> {
    let testimonials = match state.catalog.list_testimonials().await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => defaults::testimonials(),
        Err(e) => {
            warn!("Failed to list testimonials: {:?}", e);
            defaults::testimonials()
        }
    };
    Json(testimonials)
}

pub async fn list_faculty_handler(
    State(state): State<AppState>,
) -> Json<Vec<academy_core::domain::Faculty>> {
    let faculty = state.catalog.list_faculty(true).await.unwrap_or_else(|e| {
        warn!("Failed to list faculty: {:?}", e);
        Vec::new()
    });
    Json(faculty)
}

//=========================================================================================
// Contact Form
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub batch_preference: Vec<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub heard_from: String,
    #[serde(default)]
    pub enquiry_for: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryResponse {
    pub id: Uuid,
    pub status: String,
}

/// Required-field and format checks, computed before any store write.
pub fn validate_enquiry(req: &EnquiryRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if req.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if req.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "Phone number is required"));
    } else if !is_valid_indian_phone(&req.phone) {
        errors.push(FieldError::new(
            "phone",
            "Please enter a valid 10-digit mobile number",
        ));
    }
    if req.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }
    if req.course.trim().is_empty() {
        errors.push(FieldError::new("course", "Please choose a course"));
    }
    if req.message.trim().is_empty() {
        errors.push(FieldError::new("message", "Message is required"));
    }
    errors
}

/// Submit a contact-form enquiry.
#[utoipa::path(
    post,
    path = "/api/enquiries",
    request_body = EnquiryRequest,
    responses(
        (status = 201, description = "Enquiry submitted", body = EnquiryResponse),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn submit_enquiry_handler(
    State(state): State<AppState>,
    Json(req): Json<EnquiryRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let errors = validate_enquiry(&req);
    if !errors.is_empty() {
        // Nothing is written when validation fails.
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors })),
        ));
    }

    let enquiry = Enquiry {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        phone: req.phone.trim().to_string(),
        email: req.email.trim().to_string(),
        age: req.age,
        gender: req.gender,
        location: req.location,
        course: req.course,
        experience_level: req.experience_level,
        batch_preference: req.batch_preference,
        message: req.message,
        heard_from: req.heard_from,
        enquiry_for: req.enquiry_for,
        status: EnquiryStatus::New,
        notes: None,
        timestamp: Utc::now(),
    };

    state.catalog.create_enquiry(&enquiry).await.map_err(|e| {
        error!("Failed to save enquiry: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "message": "Something went wrong. Please reach us on WhatsApp or try again."
            })),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(EnquiryResponse {
            id: enquiry.id,
            status: enquiry.status.as_str().to_string(),
        }),
    ))
}

//=========================================================================================
// Tests
//=========================================================================================
