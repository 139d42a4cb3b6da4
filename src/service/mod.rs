pub mod analytics;
pub mod lead_service;
pub mod quotation_service;
pub mod task_service;
pub mod user_service;
