//! Entry point of the job-board profile server.
//!
//! Loads settings, connects to PostgreSQL, installs a Postgres-backed session
//! layer and serves the `/edit-profile` routes.

use std::sync::Arc;

use anyhow::Context as _;
use api::db::{self, PgProfileStore};
use api::{AppState, Settings};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("Failed to load settings")?;

    // Initialize database pool
    let pool = match db::connect(&settings.database).await {
        Ok(pool) => {
            tracing::info!("Database connection successful");
            pool
        }
        Err(e) => {
            tracing::error!(
                host = %settings.database.host,
                port = settings.database.port,
                database = %settings.database.name,
                user = %settings.database.user,
                "Database connection error: {}",
                e
            );
            return Err(e).context("Failed to connect to database");
        }
    };

    match db::missing_tables(&pool).await {
        Ok(missing) => {
            for table in missing {
                tracing::warn!(table, "Profile table does not exist");
            }
        }
        Err(e) => tracing::warn!("Failed to probe profile tables: {}", e),
    }

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to create session table")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            settings.session.days,
        )));

    let state = AppState::new(Arc::new(PgProfileStore::new(pool)))
        .context("Failed to load templates")?;

    let router = api::router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
