pub mod auth_router;
pub mod lead_router;
pub mod quotation_router;
pub mod task_router;
pub mod user_router;
