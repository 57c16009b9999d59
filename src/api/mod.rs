//! HTTP API for the attendance dashboard.
//!
//! The CSV export is posted as the raw request body; the date range and
//! dimension filters travel in the query string.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
