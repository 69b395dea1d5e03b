use std::{fmt, str::FromStr};

use axum::{
    Router,
    extract::{Query, rejection::QueryRejection},
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::errors::AppError;
use crate::logging::{SanitizedDigits, SanitizedEmail, ValidationEvent};
use crate::validators::{
    cpf::{CpfVerdict, validate_cpf},
    email::{EmailVerdict, validate_email},
    password::{PasswordReport, score_password},
    phone::{PhoneVerdict, validate_phone},
};

const DOCUMENTATION: &str = "Use the ?action= parameter to reach the validation methods";
const EXAMPLE: &str = "/api?action=validate-email&email=test@email.com";

pub fn router() -> Router {
    let endpoint = get(validate).fallback(reject_method);
    Router::new()
        .route("/", endpoint.clone())
        .route("/api", endpoint)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ValidateCpf,
    ValidateEmail,
    ValidatePhone,
    ValidatePassword,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::ValidateCpf,
        Action::ValidateEmail,
        Action::ValidatePhone,
        Action::ValidatePassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ValidateCpf => "validate-cpf",
            Action::ValidateEmail => "validate-email",
            Action::ValidatePhone => "validate-phone",
            Action::ValidatePassword => "validate-password",
        }
    }

    /// Comma-separated names of every action, in dispatch order.
    pub fn list() -> String {
        Self::ALL.map(|action| action.as_str()).join(", ")
    }

    fn success_message(&self) -> &'static str {
        match self {
            Action::ValidateCpf => "CPF validated",
            Action::ValidateEmail => "Email validated",
            Action::ValidatePhone => "Phone validated",
            Action::ValidatePassword => "Password analyzed",
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == name)
            .ok_or_else(|| AppError::UnknownAction(name.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidationQuery {
    pub action: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Output of whichever validator an action selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Verdict {
    Cpf(CpfVerdict),
    Email(EmailVerdict),
    Phone(PhoneVerdict),
    Password(PasswordReport),
}

#[derive(Debug, Serialize)]
struct Discovery {
    available_actions: [&'static str; 4],
    documentation: &'static str,
    example: &'static str,
}

/// Runs the validator behind `action` on its parameter from `query`.
/// An absent parameter is treated like an empty one.
pub fn dispatch(action: Action, query: &ValidationQuery) -> Result<Verdict, AppError> {
    let param = |value: &Option<String>| value.as_deref().unwrap_or_default().to_owned();

    let verdict = match action {
        Action::ValidateCpf => {
            let raw = param(&query.cpf);
            let verdict = validate_cpf(&raw)?;
            crate::log_validation_event!(
                ValidationEvent::CpfChecked,
                cpf = %SanitizedDigits::new(&raw),
                valid = verdict.valid,
                "CPF validated"
            );
            Verdict::Cpf(verdict)
        }
        Action::ValidateEmail => {
            let raw = param(&query.email);
            let verdict = validate_email(&raw)?;
            crate::log_validation_event!(
                ValidationEvent::EmailChecked,
                email = %SanitizedEmail::new(&raw),
                valid = verdict.valid,
                "Email validated"
            );
            Verdict::Email(verdict)
        }
        Action::ValidatePhone => {
            let raw = param(&query.phone);
            let verdict = validate_phone(&raw)?;
            crate::log_validation_event!(
                ValidationEvent::PhoneChecked,
                phone = %SanitizedDigits::new(&raw),
                valid = verdict.valid,
                "Phone validated"
            );
            Verdict::Phone(verdict)
        }
        Action::ValidatePassword => {
            let report = score_password(query.password.as_deref().unwrap_or_default())?;
            crate::log_validation_event!(
                ValidationEvent::PasswordScored,
                length = report.length,
                score = report.score,
                "Password analyzed"
            );
            Verdict::Password(report)
        }
    };

    Ok(verdict)
}

#[tracing::instrument(name = "validation_request", skip(query), fields(action))]
pub async fn validate(
    query: Result<Query<ValidationQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|err| AppError::InvalidQuery(err.body_text()))?;

    let action = match query.action.as_deref() {
        None | Some("") => return Ok(discovery()),
        Some(name) => name.parse::<Action>()?,
    };

    tracing::Span::current().record("action", action.as_str());

    let verdict = dispatch(action, &query)?;
    Ok(Envelope::success(action.success_message(), verdict).into_response())
}

async fn reject_method(method: Method) -> AppError {
    AppError::UnsupportedMethod(method.to_string())
}

fn discovery() -> Response {
    crate::log_validation_event!(
        ValidationEvent::DiscoveryServed,
        "Discovery payload served"
    );

    Envelope::success(
        "Validation API is running!",
        Discovery {
            available_actions: Action::ALL.map(|action| action.as_str()),
            documentation: DOCUMENTATION,
            example: EXAMPLE,
        },
    )
    .into_response()
}
