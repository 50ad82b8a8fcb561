//! Field-keyed validation messages shared by the extractors and [`super::AppError`].

use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Field name (as the client spells it) to the messages reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used when the error is not attached to a single field.
pub const BODY_KEY: &str = "body";

/// Flatten `validator` errors, renaming snake_case fields to the camelCase the API exposes.
pub fn from_validation_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();

    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => err.code.to_string(),
            })
            .collect::<Vec<_>>();

        out.entry(to_camel_case(&field))
            .or_insert_with(Vec::new)
            .extend(messages);
    }

    out
}

/// Report a typed-deserialization failure at the path where it happened.
pub fn from_deserialize_error(err: serde_path_to_error::Error<serde_json::Error>) -> FieldErrors {
    let path = err.path().to_string();
    let inner = err.into_inner().to_string();

    let (field, message) = match missing_field(&inner) {
        Some(name) => (join_path(&path, name), "Required".to_string()),
        None if path == "." => (BODY_KEY.to_string(), inner),
        None => (path, inner),
    };

    let mut out = FieldErrors::new();
    out.insert(field, vec![message]);
    out
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

fn join_path(parent: &str, field: &str) -> String {
    if parent == "." {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

pub(crate) fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;

    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}
