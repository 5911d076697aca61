//! # API crate — the edit-profile feature of the job board
//!
//! Server-side half of the profile editor: an axum router with one route,
//! `/edit-profile`, that renders the signed-in user's profile on `GET` and
//! applies partial updates on `POST`.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Session keys, the [`CurrentUser`](auth::CurrentUser) guard, flash messages |
//! | [`db`] | PostgreSQL pool, schema probe, and [`PgProfileStore`](db::PgProfileStore) |
//! | [`errors`] | [`ProfileError`](errors::ProfileError) and its mapping to HTTP responses |
//! | [`profile`] | Handlers, submission parsing and validation, view data |
//! | [`settings`] | Layered configuration (`config.toml` + `JOBBOARD_*` env) |
//! | [`views`] | Tera templates compiled into the binary |
//!
//! The router does not install a session layer. The binary adds a
//! `tower_sessions::SessionManagerLayer`; tests add one backed by memory.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use store::ProfileStore;

pub mod auth;
pub mod db;
pub mod errors;
pub mod profile;
pub mod settings;
pub mod views;

pub use errors::ProfileError;
pub use settings::Settings;

use profile::{edit_profile, update_profile, EDIT_PROFILE_PATH};
use views::Views;

/// Shared state of the profile routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>) -> Result<Self, tera::Error> {
        Ok(Self {
            store,
            views: Arc::new(Views::new()?),
        })
    }
}

/// Build the profile router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(EDIT_PROFILE_PATH, get(edit_profile).post(update_profile))
        .with_state(state)
}
