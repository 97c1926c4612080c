//! Helpers for field-level validation errors.
//!
//! Attribute rules themselves are declared with `validator` derives on the
//! input DTOs in [`crate::hour_report`]; this module builds errors that can
//! only be detected against stored data and flattens errors for responses.

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Field error raised when an attribute names a record that does not exist.
pub fn unknown_reference(field: &'static str) -> CoreError {
    let mut errors = ValidationErrors::new();
    errors.add(
        field,
        ValidationError::new("unknown_reference").with_message(Cow::Borrowed("does not exist")),
    );
    CoreError::InvalidFields(errors)
}

/// Flatten validation errors into `field -> [message]`, sorted by field name.
///
/// Errors declared without a message fall back to their code.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
