//! HTTP data service.
//!
//! GET /api/customers - every row of the `customers` table as a JSON array.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};

use crate::domain::CVError;
use crate::record::Customer;

pub const LIST_CUSTOMERS_QUERY: &str = "SELECT * FROM customers";

/// Source of customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>, CVError>;
}

pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool with default settings. Connections are opened on first
    /// use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.name);
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        Self::new(PgPoolOptions::new().connect_lazy_with(options))
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn list_customers(&self) -> Result<Vec<Customer>, CVError> {
        let customers = sqlx::query_as::<_, Customer>(LIST_CUSTOMERS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            name: "newdb".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 3001)),
            database: DatabaseConfig::default(),
        }
    }
}

/// Shared application state
pub type AppState = Arc<dyn CustomerStore>;

/// Any failure while serving data. The cause is logged, never sent.
pub struct ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

pub fn router(store: AppState) -> Router {
    Router::new()
        .route("/api/customers", get(list_customers))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// GET /api/customers
async fn list_customers(State(store): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    match store.list_customers().await {
        Ok(customers) => {
            debug!("Serving {} customers", customers.len());
            Ok(Json(customers))
        }
        Err(e) => {
            error!(error = %e, "Listing customers failed");
            Err(ApiError)
        }
    }
}

/// Start the HTTP server and serve until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> Result<(), CVError> {
    let store: AppState = Arc::new(PgCustomerStore::connect_lazy(&config.database));
    let app = router(store);

    info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        "Using database"
    );
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
    }
}
