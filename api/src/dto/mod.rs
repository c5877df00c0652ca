//! Request and response bodies of the HTTP API

pub mod users;

pub use users::*;

use validator::{Validate, ValidationErrors};
use vt_core::errors::DomainError;

use crate::handlers::ApiError;

/// Run the derive-generated checks of a request body
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError(DomainError::invalid_fields("Invalid request", messages(&errors))))
}

fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {}", field, err.code),
            })
        })
        .collect();
    messages.sort();
    messages
}
