pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::chat::handlers as chat;
use crate::dashboard::handlers as dashboard;
use crate::pages;
use crate::state::AppState;
use crate::upload::handlers as upload;

/// 302 redirect, as browsers expect after a form post or a GET action link.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate wizard
        .route("/", get(pages::handle_index))
        .route("/chat", post(chat::handle_chat))
        .route("/upload", post(upload::handle_upload))
        // Operator surface
        .route(
            "/admin",
            get(admin::handle_login_page).post(admin::handle_login),
        )
        .route("/dashboard", get(dashboard::handle_admin_dashboard))
        .route("/dashboard/master", get(dashboard::handle_master_dashboard))
        .route(
            "/dashboard/vendor/:vendor_id",
            get(dashboard::handle_vendor_dashboard),
        )
        .route("/download/:candidate_id", get(upload::handle_download))
        .route("/delete/:candidate_id", get(dashboard::handle_delete))
        .layer(body_limit)
        .with_state(state)
}
