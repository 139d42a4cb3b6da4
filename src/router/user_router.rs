use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::handler::user_handler::sales_reps_handler;
use crate::middlewares::auth_middleware::{authenticate, authorize, AuthState, RoleGuard};
use crate::model::user::UserRole;
use crate::service::user_service::UserServiceImpl;

/// Sales-rep listing, restricted to admin and salesrep roles.
pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let guard = Arc::new(RoleGuard {
        allowed: vec![UserRole::Admin, UserRole::Salesrep],
    });

    Router::new()
        .route("/users/sales-reps", get(sales_reps_handler))
        .route_layer(middleware::from_fn_with_state(guard, authorize))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
