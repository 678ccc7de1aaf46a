pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;
use utoipa::OpenApi;

use application::order_service::OrderService;
use config::Config;
use errors::AppError;
use infrastructure::catalog::{CatalogSetupError, HttpDrinkCatalog};
use infrastructure::memory::{InMemoryOrderRepository, InMemoryOrderSequence};
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::sequence::DieselOrderSequence;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Name of the counter row order ids are drawn from.
pub const ORDER_SEQUENCE: &str = "orders";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Catalog(#[from] CatalogSetupError),
    #[error("database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database migrations: {0}")]
    Migrations(String),
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::health
    ),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::CreateOrderItemRequest,
        handlers::orders::DrinkRefRequest,
        handlers::orders::OrderResponse,
        handlers::orders::OrderItemResponse,
        errors::ErrorResponse
    )),
    tags((name = "orders", description = "Drink order creation and history"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migrations(e.to_string()))?;
    Ok(())
}

/// Wire the order service to its collaborators. Without a `DATABASE_URL`
/// orders and the id counter are kept in memory and lost on restart.
pub fn build_service(config: &Config) -> Result<OrderService, StartupError> {
    let catalog = Arc::new(HttpDrinkCatalog::new(
        &config.drink_api_url,
        config.drink_api_timeout,
    )?);

    let service = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url)?;
            run_migrations(&pool)?;
            OrderService::new(
                catalog,
                Arc::new(DieselOrderSequence::new(
                    pool.clone(),
                    ORDER_SEQUENCE,
                    config.order_id_start,
                )),
                Arc::new(DieselOrderRepository::new(pool)),
            )
        }
        None => {
            log::warn!("DATABASE_URL not set, orders are kept in memory only");
            OrderService::new(
                catalog,
                Arc::new(InMemoryOrderSequence::starting_after(config.order_id_start)),
                Arc::new(InMemoryOrderRepository::new()),
            )
        }
    };
    Ok(service)
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Routes and extractor settings shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(handlers::health))
    .route("/api-docs/openapi.json", web::get().to(openapi_json))
    .service(
        web::scope("/orders")
            .route("", web::post().to(handlers::orders::create_order))
            .route("", web::get().to(handlers::orders::list_orders)),
    );
}

/// CORS policy letting the listed browser origins read and place orders.
pub fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: web::Data<OrderService>,
    config: &Config,
) -> std::io::Result<actix_web::dev::Server> {
    let origins = config.cors_allowed_origins.clone();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(cors(&origins))
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
