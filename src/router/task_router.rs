use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::handler::task_handler::{
    create_task_handler, delete_task_handler, get_task_handler, list_tasks_handler,
    update_task_handler,
};
use crate::middlewares::auth_middleware::{authenticate, AuthState};
use crate::service::task_service::TaskServiceImpl;

/// Task CRUD. All routes require a bearer token.
pub fn task_router(service: Arc<TaskServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
