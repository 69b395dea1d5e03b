pub mod cpf;
pub mod email;
pub mod password;
pub mod phone;

use thiserror::Error;

/// Failures that stop a validator before it can produce a verdict.
///
/// An input that runs through a validator and turns out to be invalid is
/// not an error: it is reported as a verdict with `valid = false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required parameter: {0}")]
    MissingParameter(&'static str),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Keeps the ASCII digits of `raw` in their original order.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub(crate) fn ensure_present(value: &str, parameter: &'static str) -> ValidationResult<()> {
    if value.is_empty() {
        tracing::debug!(parameter, "Validation skipped: parameter missing or empty");
        return Err(ValidationError::MissingParameter(parameter));
    }
    Ok(())
}
