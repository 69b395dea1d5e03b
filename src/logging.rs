use std::fmt;

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Sanitized wrapper for email addresses that masks the user part
#[derive(Debug, Clone)]
pub struct SanitizedEmail(String);

impl SanitizedEmail {
    pub fn new(email: impl AsRef<str>) -> Self {
        Self(Self::sanitize(email.as_ref().trim()))
    }

    fn sanitize(email: &str) -> String {
        if let Some((user, domain)) = email.split_once('@') {
            let masked_user = match user.chars().next() {
                Some(first) if user.chars().count() > 2 => format!("{first}***"),
                _ => "*".repeat(user.chars().count()),
            };
            format!("{}@{}", masked_user, domain)
        } else {
            "***@***".to_string()
        }
    }
}

impl fmt::Display for SanitizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sanitized wrapper for numeric identifiers (CPF, phone) that keeps only
/// the last two digits visible
#[derive(Debug, Clone)]
pub struct SanitizedDigits(String);

impl SanitizedDigits {
    const VISIBLE: usize = 2;

    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(Self::sanitize(raw.as_ref()))
    }

    fn sanitize(raw: &str) -> String {
        let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() <= Self::VISIBLE {
            return "*".repeat(digits.len());
        }

        let hidden = digits.len() - Self::VISIBLE;
        let mut masked = "*".repeat(hidden);
        masked.extend(&digits[hidden..]);
        masked
    }
}

impl fmt::Display for SanitizedDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation event types for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationEvent {
    CpfChecked,
    EmailChecked,
    PhoneChecked,
    PasswordScored,
    DiscoveryServed,
    MissingParameter,
    UnknownAction,
    UnknownRoute,
    UnsupportedMethod,
    InvalidQuery,
}

impl ValidationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationEvent::CpfChecked => "cpf_checked",
            ValidationEvent::EmailChecked => "email_checked",
            ValidationEvent::PhoneChecked => "phone_checked",
            ValidationEvent::PasswordScored => "password_scored",
            ValidationEvent::DiscoveryServed => "discovery_served",
            ValidationEvent::MissingParameter => "missing_parameter",
            ValidationEvent::UnknownAction => "unknown_action",
            ValidationEvent::UnknownRoute => "unknown_route",
            ValidationEvent::UnsupportedMethod => "unsupported_method",
            ValidationEvent::InvalidQuery => "invalid_query",
        }
    }

    /// Rejected requests, as opposed to verdicts that ran to completion.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ValidationEvent::MissingParameter
                | ValidationEvent::UnknownAction
                | ValidationEvent::UnknownRoute
                | ValidationEvent::UnsupportedMethod
                | ValidationEvent::InvalidQuery
        )
    }
}

impl fmt::Display for ValidationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log a validation event with sanitized context
#[macro_export]
macro_rules! log_validation_event {
    ($event:expr, $($field:tt)*) => {
        if $event.is_rejection() {
            tracing::warn!(
                validation_event = %$event,
                event_type = "validation",
                $($field)*
            );
        } else {
            tracing::info!(
                validation_event = %$event,
                event_type = "validation",
                $($field)*
            );
        }
    };
}
