//! REST backend for a university dining-hall menu and review application.
//!
//! The server fetches a day's entrees from the campus dining API (see the
//! `provider` crate), reconciles each one against a persistent menu-item
//! catalog, and joins items with their average review score. Around that
//! core sit review posting and moderation, alias moderation, and explicit
//! current-user resolution.
//!
//! # Layout
//!
//! - [`config`] — environment-driven configuration
//! - [`state`] — shared application state and production wiring
//! - [`routes`] — the route table
//! - [`menu`], [`reviews`], [`users`] — per-resource handlers
//! - [`database`] — pool setup and repository functions
//! - [`auth`] — principals, user resolution, role checks
//! - [`error`] — the error-to-response translation layer
//! - [`testing`] — test doubles (identity stub, in-memory pool)

use std::net::SocketAddr;

use tracing::info;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod menu;
pub mod models;
pub mod reviews;
pub mod routes;
pub mod state;
pub mod testing;
pub mod users;

use state::AppState;

pub async fn start_server() {
    let state = AppState::new().await;
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Cannot bind port!");
    info!("listening on {addr}");

    axum::serve(listener, app).await.expect("Server crashed!");
}
