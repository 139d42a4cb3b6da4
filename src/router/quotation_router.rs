use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::quotation_handler::{
    create_quotation_handler, delete_quotation_handler, download_quotation_pdf_handler,
    get_quotation_handler, list_quotations_handler, send_quotation_email_handler,
    update_quotation_handler,
};
use crate::middlewares::auth_middleware::{authenticate, AuthState};
use crate::service::quotation_service::QuotationServiceImpl;

/// Quotation lifecycle plus PDF download and email delivery. All routes
/// require a bearer token; create/update record the authenticated actor.
pub fn quotation_router(
    service: Arc<QuotationServiceImpl>,
    auth_state: Arc<AuthState>,
) -> Router {
    Router::new()
        .route(
            "/quotations",
            get(list_quotations_handler).post(create_quotation_handler),
        )
        .route(
            "/quotations/{id}",
            get(get_quotation_handler)
                .put(update_quotation_handler)
                .delete(delete_quotation_handler),
        )
        .route(
            "/quotations/{id}/send-email",
            post(send_quotation_email_handler),
        )
        .route(
            "/quotations/{id}/download-pdf",
            get(download_quotation_pdf_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
