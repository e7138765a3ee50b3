//! Input validation helpers shared by the DTOs in `promptbox_db::models`.
//!
//! Field constraints are declared with `#[derive(Validate)]` on the DTOs;
//! this module turns the resulting [`ValidationErrors`] into a stable,
//! human-readable message.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived validation rules on `input`.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}

/// Render validation errors as `field: message` pairs, sorted by field name
/// so the output does not depend on hash-map iteration order.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5, message = "must be 1-5 characters"))]
        name: String,
        #[validate(range(min = 1, max = 3))]
        level: i32,
    }

    #[test]
    fn valid_input_passes() {
        let input = Sample {
            name: "rock".into(),
            level: 2,
        };
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn messages_are_sorted_by_field() {
        let input = Sample {
            name: String::new(),
            level: 9,
        };
        let err = validate(&input).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg == "level: range; name: must be 1-5 characters");
    }
}
