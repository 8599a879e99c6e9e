//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the store ports from the `core` crate. It handles all
//! interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use academy_core::domain::{
    Course, CourseStatus, Enquiry, EnquiryStatus, Faculty, GalleryItem, HistoryEntry, Product,
    Role, SessionIdentity, Testimonial, UserCredentials, UserProfile,
};
use academy_core::ports::{
    CatalogStore, IdentityStore, PortError, PortResult, SettingsSource,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `SettingsSource`, `IdentityStore`
/// and `CatalogStore` ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct CredentialsRecord {
    uid: Uuid,
    email: String,
    hashed_password: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            uid: self.uid,
            email: self.email,
            hashed_password: self.hashed_password,
        }
    }
}

#[derive(FromRow)]
struct SessionIdentityRecord {
    uid: Uuid,
    email: String,
    display_name: String,
}
impl SessionIdentityRecord {
    fn to_domain(self) -> SessionIdentity {
        SessionIdentity {
            uid: self.uid,
            email: self.email,
            display_name: if self.display_name.is_empty() {
                None
            } else {
                Some(self.display_name)
            },
        }
    }
}

#[derive(FromRow)]
struct ProfileRecord {
    uid: Uuid,
    username: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}
impl ProfileRecord {
    fn to_domain(self) -> UserProfile {
        UserProfile {
            uid: self.uid,
            username: self.username,
            email: self.email,
            role: Role::parse(&self.role),
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct HistoryRecord {
    id: Uuid,
    uid: Uuid,
    action: String,
    description: String,
    ts: DateTime<Utc>,
    meta: Option<JsonValue>,
}
impl HistoryRecord {
    fn to_domain(self) -> HistoryEntry {
        HistoryEntry {
            id: self.id,
            uid: self.uid,
            action: self.action,
            description: self.description,
            timestamp: self.ts,
            meta: self.meta,
        }
    }
}

#[derive(FromRow)]
struct CourseRecord {
    id: Uuid,
    title: String,
    category: String,
    badge: String,
    badge_color: String,
    description: String,
    image: String,
    extra: Option<String>,
    status: String,
    featured: bool,
}
impl CourseRecord {
    fn to_domain(self) -> Course {
        Course {
            id: self.id,
            title: self.title,
            category: self.category,
            badge: self.badge,
            badge_color: self.badge_color,
            description: self.description,
            image: self.image,
            extra: self.extra,
            status: CourseStatus::parse(&self.status),
            featured: self.featured,
        }
    }
}

#[derive(FromRow)]
struct ProductRecord {
    id: Uuid,
    name: String,
    category: String,
    category_label: String,
    description: String,
    price: String,
    image: String,
    images: Vec<String>,
    stock_status: String,
    whatsapp_enquiry: bool,
}
impl ProductRecord {
    fn to_domain(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            category: self.category,
            category_label: self.category_label,
            description: self.description,
            price: self.price,
            image: self.image,
            images: self.images,
            stock_status: self.stock_status,
            whatsapp_enquiry: self.whatsapp_enquiry,
        }
    }
}

#[derive(FromRow)]
struct GalleryRecord {
    id: Uuid,
    url: String,
    public_id: String,
    category: String,
    ts: DateTime<Utc>,
}
impl GalleryRecord {
    fn to_domain(self) -> GalleryItem {
        GalleryItem {
            id: self.id,
            url: self.url,
            public_id: self.public_id,
            category: self.category,
            timestamp: self.ts,
        }
    }
}

#[derive(FromRow)]
struct TestimonialRecord {
    id: Uuid,
    quote: String,
    name: String,
    course: String,
    stars: i16,
    sort_order: i32,
}
impl TestimonialRecord {
    fn to_domain(self) -> Testimonial {
        Testimonial {
            id: self.id,
            quote: self.quote,
            name: self.name,
            course: self.course,
            stars: self.stars,
            order: self.sort_order,
        }
    }
}

#[derive(FromRow)]
struct EnquiryRecord {
    id: Uuid,
    name: String,
    phone: String,
    email: String,
    age: String,
    gender: String,
    location: String,
    course: String,
    experience_level: String,
    batch_preference: Vec<String>,
    message: String,
    heard_from: String,
    enquiry_for: String,
    status: String,
    notes: Option<String>,
    ts: DateTime<Utc>,
}
impl EnquiryRecord {
    fn to_domain(self) -> Enquiry {
        Enquiry {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            age: self.age,
            gender: self.gender,
            location: self.location,
            course: self.course,
            experience_level: self.experience_level,
            batch_preference: self.batch_preference,
            message: self.message,
            heard_from: self.heard_from,
            enquiry_for: self.enquiry_for,
            status: EnquiryStatus::parse(&self.status),
            notes: self.notes,
            timestamp: self.ts,
        }
    }
}

#[derive(FromRow)]
struct FacultyRecord {
    id: Uuid,
    name: String,
    role: String,
    bio: String,
    image_url: String,
    instagram: Option<String>,
    youtube: Option<String>,
    is_active: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl FacultyRecord {
    fn to_domain(self) -> Faculty {
        Faculty {
            id: self.id,
            name: self.name,
            role: self.role,
            bio: self.bio,
            image_url: self.image_url,
            instagram: self.instagram,
            youtube: self.youtube,
            is_active: self.is_active,
            order: self.sort_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// `SettingsSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl SettingsSource for DbAdapter {
    async fn fetch_setting(&self, key: &str) -> PortResult<Option<JsonValue>> {
        let row: Option<(JsonValue,)> =
            sqlx::query_as("SELECT data FROM site_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;
        Ok(row.map(|(data,)| data))
    }

    async fn put_setting(&self, key: &str, value: &JsonValue) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO site_settings (key, data, updated_at) VALUES ($1, $2, now())
             ON CONFLICT (key) DO UPDATE SET data = EXCLUDED.data, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }
}

//=========================================================================================
// `IdentityStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl IdentityStore for DbAdapter {
    async fn create_identity(
        &self,
        email: &str,
        display_name: &str,
        hashed_password: &str,
    ) -> PortResult<Uuid> {
        let uid = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO identities (uid, email, display_name, hashed_password)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(uid)
        .bind(email)
        .bind(display_name)
        .bind(hashed_password)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(uid)
    }

    async fn get_credentials_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT uid, email, hashed_password FROM identities WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("No account for {}", email))
            }
            _ => unexpected(e),
        })?;
        Ok(record.to_domain())
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        uid: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, uid, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(uid)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionIdentity> {
        let record = sqlx::query_as::<_, SessionIdentityRecord>(
            "SELECT i.uid, i.email, i.display_name
             FROM auth_sessions s
             JOIN identities i ON i.uid = s.uid
             WHERE s.id = $1 AND s.expires_at > now()",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::Unauthorized,
            _ => unexpected(e),
        })?;
        Ok(record.to_domain())
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn get_profile(&self, uid: Uuid) -> PortResult<Option<UserProfile>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            "SELECT uid, username, email, role, created_at FROM user_profiles WHERE uid = $1",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(ProfileRecord::to_domain))
    }

    async fn create_profile(&self, profile: &UserProfile) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO user_profiles (uid, username, email, role, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (uid) DO NOTHING",
        )
        .bind(profile.uid)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(profile.role.as_str())
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn append_history(&self, entry: &HistoryEntry) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO history (id, uid, action, description, ts, meta)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.id)
        .bind(entry.uid)
        .bind(&entry.action)
        .bind(&entry.description)
        .bind(entry.timestamp)
        .bind(&entry.meta)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn history_for_user(&self, uid: Uuid) -> PortResult<Vec<HistoryEntry>> {
        let records = sqlx::query_as::<_, HistoryRecord>(
            "SELECT id, uid, action, description, ts, meta
             FROM history WHERE uid = $1 ORDER BY ts DESC",
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(HistoryRecord::to_domain).collect())
    }
}

//=========================================================================================
// `CatalogStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogStore for DbAdapter {
    async fn list_courses(
        &self,
        status: Option<CourseStatus>,
        category: Option<&str>,
    ) -> PortResult<Vec<Course>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, title, category, badge, badge_color, description, image, extra, status, featured
             FROM courses WHERE true",
        );
        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(category) = category {
            query.push(" AND category = ").push_bind(category);
        }
        query.push(" ORDER BY featured DESC, title ASC");

        let records = query
            .build_query_as::<CourseRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(CourseRecord::to_domain).collect())
    }

    async fn create_course(&self, course: &Course) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO courses (id, title, category, badge, badge_color, description, image, extra, status, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.category)
        .bind(&course.badge)
        .bind(&course.badge_color)
        .bind(&course.description)
        .bind(&course.image)
        .bind(&course.extra)
        .bind(course.status.as_str())
        .bind(course.featured)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn update_course(&self, course: &Course) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE courses SET title = $2, category = $3, badge = $4, badge_color = $5,
             description = $6, image = $7, extra = $8, status = $9, featured = $10
             WHERE id = $1",
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.category)
        .bind(&course.badge)
        .bind(&course.badge_color)
        .bind(&course.description)
        .bind(&course.image)
        .bind(&course.extra)
        .bind(course.status.as_str())
        .bind(course.featured)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Course {} not found", course.id)));
        }
        Ok(())
    }

    async fn delete_course(&self, id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn list_products(&self, category: Option<&str>) -> PortResult<Vec<Product>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, category, category_label, description, price, image, images, stock_status, whatsapp_enquiry
             FROM products WHERE true",
        );
        if let Some(category) = category {
            query.push(" AND category = ").push_bind(category);
        }
        query.push(" ORDER BY name ASC");

        let records = query
            .build_query_as::<ProductRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(ProductRecord::to_domain).collect())
    }

    async fn create_product(&self, product: &Product) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, category, category_label, description, price, image, images, stock_status, whatsapp_enquiry)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.category_label)
        .bind(&product.description)
        .bind(&product.price)
        .bind(&product.image)
        .bind(&product.images)
        .bind(&product.stock_status)
        .bind(product.whatsapp_enquiry)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, category = $3, category_label = $4, description = $5,
             price = $6, image = $7, images = $8, stock_status = $9, whatsapp_enquiry = $10
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.category_label)
        .bind(&product.description)
        .bind(&product.price)
        .bind(&product.image)
        .bind(&product.images)
        .bind(&product.stock_status)
        .bind(product.whatsapp_enquiry)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Product {} not found", product.id)));
        }
        Ok(())
    }

    async fn delete_product(&self, id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn list_gallery(&self, category: Option<&str>) -> PortResult<Vec<GalleryItem>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, url, public_id, category, ts FROM gallery WHERE true",
        );
        if let Some(category) = category {
            query.push(" AND category = ").push_bind(category);
        }
        query.push(" ORDER BY ts DESC");

        let records = query
            .build_query_as::<GalleryRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(GalleryRecord::to_domain).collect())
    }

    async fn create_gallery_item(&self, item: &GalleryItem) -> PortResult<()> {
        sqlx::query("INSERT INTO gallery (id, url, public_id, category, ts) VALUES ($1, $2, $3, $4, $5)")
            .bind(item.id)
            .bind(&item.url)
            .bind(&item.public_id)
            .bind(&item.category)
            .bind(item.timestamp)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn delete_gallery_item(&self, id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM gallery WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn list_testimonials(&self) -> PortResult<Vec<Testimonial>> {
        let records = sqlx::query_as::<_, TestimonialRecord>(
            "SELECT id, quote, name, course, stars, sort_order
             FROM testimonials ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(records.into_iter().map(TestimonialRecord::to_domain).collect())
    }

    async fn create_testimonial(&self, testimonial: &Testimonial) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO testimonials (id, quote, name, course, stars, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(testimonial.id)
        .bind(&testimonial.quote)
        .bind(&testimonial.name)
        .bind(&testimonial.course)
        .bind(testimonial.stars)
        .bind(testimonial.order)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn update_testimonial(&self, testimonial: &Testimonial) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE testimonials SET quote = $2, name = $3, course = $4, stars = $5, sort_order = $6
             WHERE id = $1",
        )
        .bind(testimonial.id)
        .bind(&testimonial.quote)
        .bind(&testimonial.name)
        .bind(&testimonial.course)
        .bind(testimonial.stars)
        .bind(testimonial.order)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Testimonial {} not found",
                testimonial.id
            )));
        }
        Ok(())
    }

    async fn delete_testimonial(&self, id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn list_faculty(&self, only_active: bool) -> PortResult<Vec<Faculty>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, role, bio, image_url, instagram, youtube, is_active, sort_order, created_at, updated_at
             FROM faculty WHERE true",
        );
        if only_active {
            query.push(" AND is_active = true");
        }
        query.push(" ORDER BY sort_order ASC");

        let records = query
            .build_query_as::<FacultyRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(FacultyRecord::to_domain).collect())
    }

    async fn create_faculty(&self, faculty: &Faculty) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO faculty (id, name, role, bio, image_url, instagram, youtube, is_active, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(faculty.id)
        .bind(&faculty.name)
        .bind(&faculty.role)
        .bind(&faculty.bio)
        .bind(&faculty.image_url)
        .bind(&faculty.instagram)
        .bind(&faculty.youtube)
        .bind(faculty.is_active)
        .bind(faculty.order)
        .bind(faculty.created_at)
        .bind(faculty.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn update_faculty(&self, faculty: &Faculty) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE faculty SET name = $2, role = $3, bio = $4, image_url = $5, instagram = $6,
             youtube = $7, is_active = $8, sort_order = $9, updated_at = now()
             WHERE id = $1",
        )
        .bind(faculty.id)
        .bind(&faculty.name)
        .bind(&faculty.role)
        .bind(&faculty.bio)
        .bind(&faculty.image_url)
        .bind(&faculty.instagram)
        .bind(&faculty.youtube)
        .bind(faculty.is_active)
        .bind(faculty.order)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Faculty {} not found", faculty.id)));
        }
        Ok(())
    }

    async fn delete_faculty(&self, id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM faculty WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn create_enquiry(&self, enquiry: &Enquiry) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO enquiries (id, name, phone, email, age, gender, location, course,
             experience_level, batch_preference, message, heard_from, enquiry_for, status, notes, ts)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(enquiry.id)
        .bind(&enquiry.name)
        .bind(&enquiry.phone)
        .bind(&enquiry.email)
        .bind(&enquiry.age)
        .bind(&enquiry.gender)
        .bind(&enquiry.location)
        .bind(&enquiry.course)
        .bind(&enquiry.experience_level)
        .bind(&enquiry.batch_preference)
        .bind(&enquiry.message)
        .bind(&enquiry.heard_from)
        .bind(&enquiry.enquiry_for)
        .bind(enquiry.status.as_str())
        .bind(&enquiry.notes)
        .bind(enquiry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn list_enquiries(&self, status: Option<EnquiryStatus>) -> PortResult<Vec<Enquiry>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, phone, email, age, gender, location, course, experience_level,
             batch_preference, message, heard_from, enquiry_for, status, notes, ts
             FROM enquiries WHERE true",
        );
        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        query.push(" ORDER BY ts DESC");

        let records = query
            .build_query_as::<EnquiryRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(EnquiryRecord::to_domain).collect())
    }

    async fn update_enquiry_status(
        &self,
        id: Uuid,
        status: EnquiryStatus,
        notes: Option<&str>,
    ) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE enquiries SET status = $2, notes = COALESCE($3, notes) WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Enquiry {} not found", id)));
        }
        Ok(())
    }
}
