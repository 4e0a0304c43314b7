//! HTTP adapter for the newsletter subscription stub.

mod dto;
mod handlers;
mod routes;

pub use dto::{SubscribeFailure, SubscribeRequest, SubscribeSuccess};
pub use handlers::NewsletterHandlers;
pub use routes::newsletter_routes;
