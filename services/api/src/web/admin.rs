//! services/api/src/web/admin.rs
//!
//! The admin console endpoints: direct create/update/delete against the
//! content collections, with required-field validation only. Deletes are
//! permanent - there is no soft-delete or undo. Write failures surface as a
//! generic message; nothing is retried automatically.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use academy_core::domain::{
    Course, CourseStatus, Enquiry, EnquiryStatus, Faculty, GalleryItem, HistoryEntry, Product,
    Testimonial,
};
use academy_core::ports::PortError;
use crate::adapters::cdn::UploadTarget;
use crate::web::export::enquiries_csv;
use crate::web::state::{AppState, CurrentUser};

/// The settings documents an admin may edit.
const EDITABLE_SETTINGS: &[&str] = &["contactInfo", "hero", "stats"];

fn write_error(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        other => {
            error!("Admin write failed: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.".to_string(),
            )
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<(), (StatusCode, String)> {
    if value.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, format!("{} is required", field)));
    }
    Ok(())
}

//=========================================================================================
// Courses
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub badge_color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub extra: Option<String>,
    /// "active" or "draft"; omitted means draft.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<CourseStatus>,
    #[serde(default)]
    pub featured: bool,
}

impl CoursePayload {
    fn into_course(self, id: Uuid) -> Course {
        Course {
            id,
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            badge: self.badge,
            badge_color: self.badge_color,
            description: self.description,
            image: self.image,
            extra: self.extra,
            status: self.status.unwrap_or(CourseStatus::Draft),
            featured: self.featured,
        }
    }
}

/// GET /admin/courses - every course, drafts included.
#[utoipa::path(
    get,
    path = "/admin/courses",
    responses(
        (status = 200, description = "All courses, drafts included"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_courses_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    let courses = state
        .catalog
        .list_courses(None, None)
        .await
        .map_err(write_error)?;
    Ok(Json(courses))
}

/// POST /admin/courses - create a course.
#[utoipa::path(
    post,
    path = "/admin/courses",
    request_body = CoursePayload,
    responses(
        (status = 201, description = "Course created"),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_course_handler(
    State(state): State<AppState>,
    Json(payload): Json<CoursePayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    required(&payload.title, "Title")?;
    required(&payload.category, "Category")?;

    let course = payload.into_course(Uuid::new_v4());
    state
        .catalog
        .create_course(&course)
        .await
        .map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /admin/courses/{id} - replace a course.
#[utoipa::path(
    put,
    path = "/admin/courses/{id}",
    request_body = CoursePayload,
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course replaced"),
        (status = 404, description = "No such course")
    )
)]
pub async fn update_course_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CoursePayload>,
) -> Result<Json<Course>, (StatusCode, String)> {
    required(&payload.title, "Title")?;
    required(&payload.category, "Category")?;

    let course = payload.into_course(id);
    state
        .catalog
        .update_course(&course)
        .await
        .map_err(write_error)?;
    Ok(Json(course))
}

/// DELETE /admin/courses/{id} - permanent, no undo.
#[utoipa::path(
    delete,
    path = "/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "No such course")
    )
)]
pub async fn delete_course_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .delete_course(id)
        .await
        .map_err(write_error)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Products
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub category_label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock_status: String,
    #[serde(default = "default_true")]
    pub whatsapp_enquiry: bool,
}

fn default_true() -> bool {
    true
}

impl ProductPayload {
    fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            category_label: self.category_label,
            description: self.description,
            price: self.price,
            image: self.image,
            images: self.images,
            stock_status: if self.stock_status.is_empty() {
                "in_stock".to_string()
            } else {
                self.stock_status
            },
            whatsapp_enquiry: self.whatsapp_enquiry,
        }
    }
}

/// GET /admin/products - every product.
#[utoipa::path(
    get,
    path = "/admin/products",
    responses(
        (status = 200, description = "All products"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    let products = state
        .catalog
        .list_products(None)
        .await
        .map_err(write_error)?;
    Ok(Json(products))
}

/// POST /admin/products - create a product.
#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    required(&payload.name, "Name")?;
    required(&payload.category, "Category")?;

    let product = payload.into_product(Uuid::new_v4());
    state
        .catalog
        .create_product(&product)
        .await
        .map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id} - replace a product.
#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    request_body = ProductPayload,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product replaced"),
        (status = 404, description = "No such product")
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, (StatusCode, String)> {
    required(&payload.name, "Name")?;
    required(&payload.category, "Category")?;

    let product = payload.into_product(id);
    state
        .catalog
        .update_product(&product)
        .await
        .map_err(write_error)?;
    Ok(Json(product))
}

/// DELETE /admin/products/{id} - permanent, no undo.
#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No such product")
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .delete_product(id)
        .await
        .map_err(write_error)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Gallery
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPayload {
    pub url: String,
    /// Empty for externally hosted images.
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub category: String,
}

/// GET /admin/gallery - every gallery item.
#[utoipa::path(
    get,
    path = "/admin/gallery",
    responses(
        (status = 200, description = "All gallery items"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_gallery_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItem>>, (StatusCode, String)> {
    let items = state
        .catalog
        .list_gallery(None)
        .await
        .map_err(write_error)?;
    Ok(Json(items))
}

/// POST /admin/gallery - record an uploaded image's metadata.
#[utoipa::path(
    post,
    path = "/admin/gallery",
    request_body = GalleryPayload,
    responses(
        (status = 201, description = "Gallery item created"),
        (status = 400, description = "Missing image URL")
    )
)]
pub async fn create_gallery_item_handler(
    State(state): State<AppState>,
    Json(payload): Json<GalleryPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    required(&payload.url, "Image URL")?;

    let item = GalleryItem {
        id: Uuid::new_v4(),
        url: payload.url.trim().to_string(),
        public_id: payload.public_id,
        category: payload.category,
        timestamp: Utc::now(),
    };
    state
        .catalog
        .create_gallery_item(&item)
        .await
        .map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /admin/gallery/{id} - permanent, no undo.
#[utoipa::path(
    delete,
    path = "/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery item id")),
    responses(
        (status = 204, description = "Gallery item deleted"),
        (status = 404, description = "No such gallery item")
    )
)]
pub async fn delete_gallery_item_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .delete_gallery_item(id)
        .await
        .map_err(write_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Hands the admin UI the unsigned-upload endpoint; the file itself goes
/// browser -> CDN, and only the returned metadata comes back here.
#[utoipa::path(
    get,
    path = "/admin/uploads/config",
    responses(
        (status = 200, description = "Unsigned-upload endpoint details", body = UploadTarget)
    )
)]
pub async fn upload_config_handler(State(state): State<AppState>) -> Json<UploadTarget> {
    Json(state.cdn.upload_target())
}

//=========================================================================================
// Testimonials
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPayload {
    pub quote: String,
    pub name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default = "default_stars")]
    pub stars: i16,
    #[serde(default)]
    pub order: i32,
}

fn default_stars() -> i16 {
    5
}

impl TestimonialPayload {
    fn into_testimonial(self, id: Uuid) -> Testimonial {
        Testimonial {
            id,
            quote: self.quote.trim().to_string(),
            name: self.name.trim().to_string(),
            course: self.course,
            stars: self.stars.clamp(1, 5),
            order: self.order,
        }
    }
}

/// GET /admin/testimonials - every testimonial, in display order.
#[utoipa::path(
    get,
    path = "/admin/testimonials",
    responses(
        (status = 200, description = "All testimonials"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_testimonials_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, (StatusCode, String)> {
    let testimonials = state
        .catalog
        .list_testimonials()
        .await
        .map_err(write_error)?;
    Ok(Json(testimonials))
}

/// POST /admin/testimonials - create a testimonial.
#[utoipa::path(
    post,
    path = "/admin/testimonials",
    request_body = TestimonialPayload,
    responses(
        (status = 201, description = "Testimonial created"),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_testimonial_handler(
    State(state): State<AppState>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    required(&payload.quote, "Quote")?;
    required(&payload.name, "Name")?;

    let testimonial = payload.into_testimonial(Uuid::new_v4());
    state
        .catalog
        .create_testimonial(&testimonial)
        .await
        .map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// PUT /admin/testimonials/{id} - replace a testimonial.
#[utoipa::path(
    put,
    path = "/admin/testimonials/{id}",
    request_body = TestimonialPayload,
    params(("id" = Uuid, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial replaced"),
        (status = 404, description = "No such testimonial")
    )
)]
pub async fn update_testimonial_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<Json<Testimonial>, (StatusCode, String)> {
    required(&payload.quote, "Quote")?;
    required(&payload.name, "Name")?;

    let testimonial = payload.into_testimonial(id);
    state
        .catalog
        .update_testimonial(&testimonial)
        .await
        .map_err(write_error)?;
    Ok(Json(testimonial))
}

/// DELETE /admin/testimonials/{id} - permanent, no undo.
#[utoipa::path(
    delete,
    path = "/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial id")),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 404, description = "No such testimonial")
    )
)]
pub async fn delete_testimonial_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .delete_testimonial(id)
        .await
        .map_err(write_error)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Faculty
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyPayload {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image_url: String,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
}

impl FacultyPayload {
    fn into_faculty(self, id: Uuid) -> Faculty {
        let now = Utc::now();
        Faculty {
            id,
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            bio: self.bio,
            image_url: self.image_url,
            instagram: self.instagram,
            youtube: self.youtube,
            is_active: self.is_active,
            order: self.order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// GET /admin/faculty - every faculty member, inactive included.
#[utoipa::path(
    get,
    path = "/admin/faculty",
    responses(
        (status = 200, description = "All faculty, inactive included"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_faculty_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Faculty>>, (StatusCode, String)> {
    let faculty = state
        .catalog
        .list_faculty(false)
        .await
        .map_err(write_error)?;
    Ok(Json(faculty))
}

/// POST /admin/faculty - create a faculty member.
#[utoipa::path(
    post,
    path = "/admin/faculty",
    request_body = FacultyPayload,
    responses(
        (status = 201, description = "Faculty member created"),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_faculty_handler(
    State(state): State<AppState>,
    Json(payload): Json<FacultyPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    required(&payload.name, "Name")?;
    required(&payload.role, "Role")?;

    let faculty = payload.into_faculty(Uuid::new_v4());
    state
        .catalog
        .create_faculty(&faculty)
        .await
        .map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

/// PUT /admin/faculty/{id} - replace a faculty member.
#[utoipa::path(
    put,
    path = "/admin/faculty/{id}",
    request_body = FacultyPayload,
    params(("id" = Uuid, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty member replaced"),
        (status = 404, description = "No such faculty member")
    )
)]
pub async fn update_faculty_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FacultyPayload>,
) -> Result<Json<Faculty>, (StatusCode, String)> {
    required(&payload.name, "Name")?;
    required(&payload.role, "Role")?;

    let faculty = payload.into_faculty(id);
    state
        .catalog
        .update_faculty(&faculty)
        .await
        .map_err(write_error)?;
    Ok(Json(faculty))
}

/// DELETE /admin/faculty/{id} - permanent, no undo.
#[utoipa::path(
    delete,
    path = "/admin/faculty/{id}",
    params(("id" = Uuid, Path, description = "Faculty id")),
    responses(
        (status = 204, description = "Faculty member deleted"),
        (status = 404, description = "No such faculty member")
    )
)]
pub async fn delete_faculty_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .delete_faculty(id)
        .await
        .map_err(write_error)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Enquiries
//=========================================================================================

#[derive(Deserialize)]
pub struct EnquiryFilter {
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryUpdate {
    pub status: String,
    pub notes: Option<String>,
}

/// GET /admin/enquiries - submissions, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/admin/enquiries",
    params(("status" = Option<String>, Query, description = "Filter by enquiry status")),
    responses(
        (status = 200, description = "Enquiries, newest first"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn list_enquiries_handler(
    State(state): State<AppState>,
    Query(filter): Query<EnquiryFilter>,
) -> Result<Json<Vec<Enquiry>>, (StatusCode, String)> {
    let status = filter.status.as_deref().map(EnquiryStatus::parse);
    let enquiries = state
        .catalog
        .list_enquiries(status)
        .await
        .map_err(write_error)?;
    Ok(Json(enquiries))
}

/// Admins change status and notes only; the submission itself is immutable
/// and enquiries are never deleted.
#[utoipa::path(
    patch,
    path = "/admin/enquiries/{id}",
    request_body = EnquiryUpdate,
    params(("id" = Uuid, Path, description = "Enquiry id")),
    responses(
        (status = 200, description = "Status and notes updated"),
        (status = 404, description = "No such enquiry")
    )
)]
pub async fn update_enquiry_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<EnquiryUpdate>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .update_enquiry_status(id, EnquiryStatus::parse(&update.status), update.notes.as_deref())
        .await
        .map_err(write_error)?;
    Ok(StatusCode::OK)
}

/// GET /admin/enquiries/export - CSV of the currently filtered list.
#[utoipa::path(
    get,
    path = "/admin/enquiries/export",
    params(("status" = Option<String>, Query, description = "Filter by enquiry status")),
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn export_enquiries_handler(
    State(state): State<AppState>,
    Query(filter): Query<EnquiryFilter>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let status = filter.status.as_deref().map(EnquiryStatus::parse);
    let enquiries = state
        .catalog
        .list_enquiries(status)
        .await
        .map_err(write_error)?;

    let csv = enquiries_csv(&enquiries);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"enquiries.csv\"".to_string(),
            ),
        ],
        csv,
    ))
}

//=========================================================================================
// Settings & History
//=========================================================================================

/// PUT /admin/settings/{key} - replace one settings document, then drop the
/// cached copy so public reads observe the edit without a process restart.
#[utoipa::path(
    put,
    path = "/admin/settings/{key}",
    request_body = serde_json::Value,
    params(("key" = String, Path, description = "Settings document key")),
    responses(
        (status = 200, description = "Setting replaced"),
        (status = 400, description = "Document is not a JSON object"),
        (status = 404, description = "Unknown setting key")
    )
)]
pub async fn put_setting_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !EDITABLE_SETTINGS.contains(&key.as_str()) {
        return Err((StatusCode::NOT_FOUND, format!("Unknown setting '{}'", key)));
    }
    if !value.is_object() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Setting document must be a JSON object".to_string(),
        ));
    }

    state
        .settings
        .put(&key, &value)
        .await
        .map_err(write_error)?;
    Ok(StatusCode::OK)
}

/// GET /admin/history - the signed-in admin's own activity, newest first.
#[utoipa::path(
    get,
    path = "/admin/history",
    responses(
        (status = 200, description = "Activity entries, newest first"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn history_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<HistoryEntry>>, (StatusCode, String)> {
    let entries = state
        .identity
        .history_for_user(user.uid)
        .await
        .map_err(write_error)?;
    Ok(Json(entries))
}
