//! HTTP adapter for marketing-site content.

mod handlers;
mod routes;

pub use handlers::{ContentHandlers, ContentListResponse};
pub use routes::content_routes;
