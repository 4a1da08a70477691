use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::admin::auth::{authenticate, Grant};
use crate::errors::AppError;
use crate::pages;
use crate::routes::found;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

/// GET /admin
pub async fn handle_login_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::login_page(state.config.mode))
}

/// POST /admin
pub async fn handle_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let result = authenticate(
        state.store.as_ref(),
        state.config.mode,
        &state.config.master_password,
        form.username.as_deref(),
        &form.password,
    )
    .await;

    match result {
        Ok(grant) => {
            match grant {
                Grant::Master => info!("Master login"),
                Grant::Vendor(vendor_id) => info!(vendor_id, "Vendor login"),
            }
            Ok(found(&grant.dashboard_path(state.config.mode)))
        }
        Err(err) => {
            if matches!(err, AppError::Forbidden) {
                warn!(username = ?form.username, "Rejected admin login");
            }
            Err(err)
        }
    }
}
