//! Shared API request/response types

pub mod envelope;
pub mod error;
pub mod ids;
pub mod json;

pub use envelope::DataResponse;
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use ids::parse_id;
pub use json::Json;
