//! Shared HTTP building blocks: error body and request extractors

pub mod error;
pub mod query_params;
pub mod validated_json;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
