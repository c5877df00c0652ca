//! Type definitions shared between the transport and its clients
//!
//! - `response` - the success and failure JSON envelopes

pub mod response;

pub use response::{ApiErrorBody, ApiResponse, Empty};
