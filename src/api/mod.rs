//! HTTP API surface

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, EmbedRequest, EmbedResponse};
pub use routes::build_router;
