pub mod article;
pub mod user;

use std::collections::HashMap;
use validator::ValidationErrors;

/// Flattens `validator` output into one message per field for inline
/// display on a re-rendered form. Only the first error per field is shown.
pub fn field_errors(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.clone())
                .map(|m| m.into_owned())
                .unwrap_or_else(|| "Invalid value".to_string());
            (field.to_string(), message)
        })
        .collect()
}
