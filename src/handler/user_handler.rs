use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

pub async fn sales_reps_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let reps = service.sales_reps().await?;
    Ok(Json(reps))
}
