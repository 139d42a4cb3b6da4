use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::auth_handler::{login_handler, refresh_token_handler, register_handler};
use crate::service::user_service::UserServiceImpl;

/// Public authentication routes.
pub fn auth_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh-token", post(refresh_token_handler))
        .with_state(service)
}
