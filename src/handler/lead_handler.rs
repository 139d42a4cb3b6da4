use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::dto::lead_dto::{ImportResponse, LeadPatch};
use crate::model::lead::Lead;
use crate::service::lead_service::{LeadService, LeadServiceImpl};
use crate::util::error::HandlerError;

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid lead id"))
}

pub async fn create_lead_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Json(payload): Json<Lead>,
) -> Result<impl IntoResponse, HandlerError> {
    let lead = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

pub async fn import_leads_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Json(payload): Json<Vec<Lead>>,
) -> Result<impl IntoResponse, HandlerError> {
    let imported = service.import(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            message: format!("{} leads imported successfully.", imported),
        }),
    ))
}

pub async fn list_leads_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let leads = service.list(params.get("status").cloned()).await?;
    Ok(Json(leads))
}

pub async fn get_lead_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let lead = service.get(parse_id(&id)?).await?;
    Ok(Json(lead))
}

pub async fn update_lead_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<LeadPatch>,
) -> Result<impl IntoResponse, HandlerError> {
    let lead = service.update(parse_id(&id)?, payload).await?;
    Ok(Json(lead))
}

pub async fn delete_lead_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "message": "Lead deleted" })))
}

pub async fn lead_stats_handler(
    State(service): State<Arc<LeadServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.status_distribution().await?;
    Ok(Json(stats))
}

pub async fn lead_trends_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let mode = params.get("type").map(|s| s.as_str()).unwrap_or("year");
    let trends = service
        .trends(
            mode,
            params.get("startDate").cloned(),
            params.get("endDate").cloned(),
        )
        .await?;
    Ok(Json(trends))
}

pub async fn lead_metrics_handler(
    State(service): State<Arc<LeadServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let metrics = service.metrics().await?;
    Ok(Json(metrics))
}

pub async fn monthly_metrics_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HandlerError> {
    let year = match params.get("year") {
        Some(raw) => Some(
            raw.parse::<i32>()
                .map_err(|_| HandlerError::bad_request("Invalid year value"))?,
        ),
        None => None,
    };
    let metrics = service.monthly_metrics(year).await?;
    Ok(Json(metrics))
}
