//! Error mapping shared by every handler

pub mod error;

pub use error::{json_error_handler, not_found, ApiError, ApiResult};
