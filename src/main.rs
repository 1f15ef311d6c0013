pub mod appointments;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod stylists;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use appointments::{BookingService, RandomPicker};
use config::BookingConfig;
use error::ApiError;
use models::{CreateService, Service, UpdateService};
use stylists::repository::{SchedulesRepository, StylistsRepository};
use validator::Validate;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        create_service,
        get_all_services,
        get_service_by_id,
        update_service,
        delete_service,
    ),
    components(
        schemas(Service, CreateService, UpdateService)
    ),
    tags(
        (name = "services", description = "Salon service catalog endpoints")
    ),
    info(
        title = "Salon Booking API",
        version = "1.0.0",
        description = "RESTful API for hair salon appointment booking",
        contact(
            name = "API Support",
            email = "support@salonapi.com"
        )
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: BookingConfig,
    pub booking: BookingService,
    pub stylists_repo: StylistsRepository,
    pub schedules_repo: SchedulesRepository,
}

/// Handler for POST /api/services
/// Creates a new salon service
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created successfully", body = Service),
        (status = 400, description = "Invalid input data", body = String, example = json!({"error": "Duration must be a positive number of minutes"})),
        (status = 409, description = "Duplicate service name", body = String, example = json!({"error": "Service with name 'Haircut' already exists"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "services"
)]
async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateService>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    tracing::debug!("Creating new service: {}", payload.name);

    payload.validate()?;

    if db::check_duplicate_service(&state.db, &payload.name).await? {
        tracing::warn!("Attempt to create duplicate service: {}", payload.name);
        return Err(ApiError::Conflict {
            message: format!("Service with name '{}' already exists", payload.name),
        });
    }

    let service = sqlx::query_as::<_, Service>(
        r#"
        INSERT INTO services (name, duration_minutes, price, is_active)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, duration_minutes, price, is_active, created_at, updated_at
        "#,
    )
    .bind(&payload.name)
    .bind(payload.duration_minutes)
    .bind(payload.price)
    .bind(payload.is_active)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Successfully created service with id: {}", service.id);
    Ok((StatusCode::CREATED, Json(service)))
}

/// Handler for GET /api/services
/// Retrieves all salon services
#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "List of all services", body = Vec<Service>),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "services"
)]
async fn get_all_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    tracing::debug!("Fetching all services");

    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, duration_minutes, price, is_active, created_at, updated_at
        FROM services
        ORDER BY id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} services", services.len());
    Ok(Json(services))
}

/// Handler for GET /api/services/:id
/// Retrieves a specific service by ID
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service found", body = Service),
        (status = 404, description = "Service not found", body = String, example = json!({"error": "Service with id 1 not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "services"
)]
async fn get_service_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Service>, ApiError> {
    tracing::debug!("Fetching service with id: {}", id);

    let service = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, duration_minutes, price, is_active, created_at, updated_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Service with id {} not found", id);
        ApiError::NotFound {
            resource: "Service".to_string(),
            id: id.to_string(),
        }
    })?;

    tracing::debug!("Successfully retrieved service: {}", service.name);
    Ok(Json(service))
}

/// Handler for PUT /api/services/:id
/// Updates an existing service
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    request_body = UpdateService,
    responses(
        (status = 200, description = "Service updated successfully", body = Service),
        (status = 400, description = "Invalid input data", body = String, example = json!({"error": "Duration must be a positive number of minutes"})),
        (status = 404, description = "Service not found", body = String, example = json!({"error": "Service with id 1 not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "services"
)]
async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateService>,
) -> Result<Json<Service>, ApiError> {
    tracing::debug!("Updating service with id: {}", id);

    payload.validate()?;

    // Transaction keeps the duplicate check and the update atomic
    let mut tx = state.db.begin().await?;

    let existing = sqlx::query_as::<_, Service>(
        "SELECT id, name, duration_minutes, price, is_active, created_at, updated_at
         FROM services WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Service with id {} not found for update", id);
        ApiError::NotFound {
            resource: "Service".to_string(),
            id: id.to_string(),
        }
    })?;

    if let Some(ref new_name) = payload.name {
        if new_name != &existing.name {
            if db::check_duplicate_service_excluding_id(&mut *tx, new_name, id).await? {
                tracing::warn!(
                    "Attempt to update service {} to duplicate name: {}",
                    id,
                    new_name
                );
                return Err(ApiError::Conflict {
                    message: format!("Service with name '{}' already exists", new_name),
                });
            }
        }
    }

    let updated_service = sqlx::query_as::<_, Service>(
        r#"
        UPDATE services
        SET name = $1,
            duration_minutes = $2,
            price = $3,
            is_active = $4,
            updated_at = NOW()
        WHERE id = $5
        RETURNING id, name, duration_minutes, price, is_active, created_at, updated_at
        "#,
    )
    .bind(payload.name.unwrap_or(existing.name))
    .bind(payload.duration_minutes.unwrap_or(existing.duration_minutes))
    .bind(payload.price.unwrap_or(existing.price))
    .bind(payload.is_active.unwrap_or(existing.is_active))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Successfully updated service with id: {}", id);
    Ok(Json(updated_service))
}

/// Handler for DELETE /api/services/:id
/// Deletes a service from the catalog
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 204, description = "Service deleted successfully"),
        (status = 404, description = "Service not found", body = String, example = json!({"error": "Service with id 1 not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Database error"}))
    ),
    tag = "services"
)]
async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!("Deleting service with id: {}", id);

    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        tracing::debug!("Service with id {} not found for deletion", id);
        return Err(ApiError::NotFound {
            resource: "Service".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("Successfully deleted service with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(db: PgPool, config: BookingConfig) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let booking = BookingService::new(db.clone(), config.clone(), Arc::new(RandomPicker));
    let state = AppState {
        stylists_repo: StylistsRepository::new(db.clone()),
        schedules_repo: SchedulesRepository::new(db.clone()),
        booking,
        config,
        db,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Service catalog
        .route("/api/services", post(create_service))
        .route("/api/services", get(get_all_services))
        .route("/api/services/:id", get(get_service_by_id))
        .route("/api/services/:id", put(update_service))
        .route("/api/services/:id", delete(delete_service))
        // Stylists and schedules
        .route("/api/stylists", get(stylists::list_stylists_handler))
        .route("/api/stylists", post(stylists::create_stylist_handler))
        .route("/api/stylists/:id", get(stylists::get_stylist_handler))
        .route(
            "/api/stylists/:id/schedule/overrides",
            put(stylists::upsert_schedule_override_handler),
        )
        .route(
            "/api/stylists/:id/schedule/overrides",
            get(stylists::list_schedule_overrides_handler),
        )
        .route(
            "/api/stylists/:id/schedule/weekly",
            put(stylists::upsert_weekly_hours_handler),
        )
        .route(
            "/api/stylists/:id/schedule/weekly",
            get(stylists::list_weekly_hours_handler),
        )
        // Booking
        .route(
            "/api/appointments/slots",
            get(appointments::list_slots_handler),
        )
        .route(
            "/api/appointments/verify",
            post(appointments::verify_appointment_handler),
        )
        .route(
            "/api/appointments",
            post(appointments::create_appointment_handler),
        )
        .route(
            "/api/appointments",
            get(appointments::list_appointments_handler),
        )
        .route(
            "/api/appointments/:id",
            get(appointments::get_appointment_handler),
        )
        .route(
            "/api/appointments/:id",
            put(appointments::update_appointment_handler),
        )
        .route(
            "/api/appointments/:id/status",
            patch(appointments::update_status_handler),
        )
        .route(
            "/api/appointments/:id/cancel",
            post(appointments::cancel_appointment_handler),
        )
        .route(
            "/api/appointments/:id/history",
            get(appointments::get_change_log_handler),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    // This enables the error!, warn!, info!, debug!, and trace! macros
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Salon Booking API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let config = BookingConfig::from_env();

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool, config);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Salon Booking API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
