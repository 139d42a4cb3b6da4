use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::task_dto::{CreateTaskRequest, TaskPatch};
use crate::service::task_service::{TaskService, TaskServiceImpl};
use crate::util::error::HandlerError;

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid task id"))
}

pub async fn create_task_handler(
    State(service): State<Arc<TaskServiceImpl>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::bad_request(format!("Validation error: {}", e)))?;

    let task = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks_handler(
    State(service): State<Arc<TaskServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let tasks = service.list().await?;
    Ok(Json(tasks))
}

pub async fn get_task_handler(
    State(service): State<Arc<TaskServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let task = service.get(parse_id(&id)?).await?;
    Ok(Json(task))
}

pub async fn update_task_handler(
    State(service): State<Arc<TaskServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<TaskPatch>,
) -> Result<impl IntoResponse, HandlerError> {
    let task = service.update(parse_id(&id)?, payload).await?;
    Ok(Json(task))
}

pub async fn delete_task_handler(
    State(service): State<Arc<TaskServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "message": "Task deleted successfully" })))
}
