//! HTTP adapter for assessment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssessmentStateResponse, ErrorResponse, ExportQuery, IntentResponse};
pub use handlers::AssessmentHandlers;
pub use routes::assessment_routes;
