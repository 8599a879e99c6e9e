//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{CdnAdapter, DbAdapter},
    config::Config,
    error::ApiError,
    web::{
        admin, auth,
        middleware::{require_admin, require_auth},
        public,
        public::ApiDoc,
        state::AppState,
    },
};
use academy_core::ports::{CatalogStore, IdentityStore, SettingsSource};
use academy_core::settings::SiteSettings;
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Build the Shared AppState ---
    let settings = Arc::new(SiteSettings::new(
        db_adapter.clone() as Arc<dyn SettingsSource>
    ));
    let cdn = CdnAdapter::new(
        config.cdn_cloud_name.clone(),
        config.cdn_upload_preset.clone(),
    );
    let app_state = AppState {
        identity: db_adapter.clone() as Arc<dyn IdentityStore>,
        catalog: db_adapter as Arc<dyn CatalogStore>,
        settings,
        cdn,
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/api/settings/contact", get(public::contact_info_handler))
        .route("/api/settings/hero", get(public::hero_handler))
        .route("/api/settings/stats", get(public::stats_handler))
        .route("/api/courses", get(public::list_courses_handler))
        .route("/api/courses/featured", get(public::featured_courses_handler))
        .route("/api/products", get(public::list_products_handler))
        .route("/api/gallery", get(public::list_gallery_handler))
        .route("/api/testimonials", get(public::list_testimonials_handler))
        .route("/api/faculty", get(public::list_faculty_handler))
        .route("/api/enquiries", post(public::submit_enquiry_handler));

    // Admin routes (auth + admin gate). The auth layer is added last so it
    // runs first.
    let admin_routes = Router::new()
        .route(
            "/admin/courses",
            get(admin::list_courses_handler).post(admin::create_course_handler),
        )
        .route(
            "/admin/courses/{id}",
            put(admin::update_course_handler).delete(admin::delete_course_handler),
        )
        .route(
            "/admin/products",
            get(admin::list_products_handler).post(admin::create_product_handler),
        )
        .route(
            "/admin/products/{id}",
            put(admin::update_product_handler).delete(admin::delete_product_handler),
        )
        .route(
            "/admin/gallery",
            get(admin::list_gallery_handler).post(admin::create_gallery_item_handler),
        )
        .route("/admin/gallery/{id}", delete(admin::delete_gallery_item_handler))
        .route("/admin/uploads/config", get(admin::upload_config_handler))
        .route(
            "/admin/testimonials",
            get(admin::list_testimonials_handler).post(admin::create_testimonial_handler),
        )
        .route(
            "/admin/testimonials/{id}",
            put(admin::update_testimonial_handler).delete(admin::delete_testimonial_handler),
        )
        .route(
            "/admin/faculty",
            get(admin::list_faculty_handler).post(admin::create_faculty_handler),
        )
        .route(
            "/admin/faculty/{id}",
            put(admin::update_faculty_handler).delete(admin::delete_faculty_handler),
        )
        .route("/admin/enquiries", get(admin::list_enquiries_handler))
        .route("/admin/enquiries/export", get(admin::export_enquiries_handler))
        .route("/admin/enquiries/{id}", axum::routing::patch(admin::update_enquiry_handler))
        .route("/admin/settings/{key}", put(admin::put_setting_handler))
        .route("/admin/history", get(admin::history_handler))
        .route_layer(axum_middleware::from_fn(require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
