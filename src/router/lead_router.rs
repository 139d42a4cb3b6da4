use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::lead_handler::{
    create_lead_handler, delete_lead_handler, get_lead_handler, import_leads_handler,
    lead_metrics_handler, lead_stats_handler, lead_trends_handler, list_leads_handler,
    monthly_metrics_handler, update_lead_handler,
};
use crate::middlewares::auth_middleware::{authenticate, AuthState};
use crate::service::lead_service::LeadServiceImpl;

/// Lead CRUD, bulk import and analytics. All routes require a bearer token.
pub fn lead_router(service: Arc<LeadServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/leads", get(list_leads_handler).post(create_lead_handler))
        .route("/leads/import", post(import_leads_handler))
        .route("/leads/stats", get(lead_stats_handler))
        .route("/leads/bar-stats", get(lead_trends_handler))
        .route("/leads/metrics", get(lead_metrics_handler))
        .route("/leads/monthly-metrics", get(monthly_metrics_handler))
        .route(
            "/leads/{id}",
            get(get_lead_handler)
                .put(update_lead_handler)
                .delete(delete_lead_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
