use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;

use crate::dto::quotation_dto::{CreateQuotationRequest, UpdateQuotationRequest};
use crate::middlewares::auth_middleware::AuthUser;
use crate::service::quotation_service::{QuotationService, QuotationServiceImpl};
use crate::util::error::HandlerError;

fn parse_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid quotation id"))
}

pub async fn create_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotation = service.create(payload, auth_user.id).await?;
    Ok((StatusCode::CREATED, Json(quotation)))
}

pub async fn list_quotations_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotations = service.list().await?;
    Ok(Json(quotations))
}

pub async fn get_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotation = service.get(parse_id(&id)?).await?;
    Ok(Json(quotation))
}

pub async fn update_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotation = service
        .update(parse_id(&id)?, payload, Some(auth_user.id))
        .await?;
    Ok(Json(quotation))
}

pub async fn delete_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(parse_id(&id)?).await?;
    Ok(Json(
        serde_json::json!({ "message": "Quotation deleted successfully" }),
    ))
}

pub async fn send_quotation_email_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    service.send_email(parse_id(&id)?).await?;
    Ok(Json(
        serde_json::json!({ "message": "Quotation email sent successfully" }),
    ))
}

pub async fn download_quotation_pdf_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let (filename, pdf) = service.render_pdf(parse_id(&id)?).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        pdf,
    ))
}
