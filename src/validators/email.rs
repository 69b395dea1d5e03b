use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{ValidationResult, ensure_present};

const MAX_LOCAL_LEN: usize = 64;
const MAX_ADDRESS_LEN: usize = 254;

pub const REASON_VALID: &str = "valid email";
pub const REASON_MISSING_AT: &str = "missing '@' symbol";
pub const REASON_EMPTY_USER: &str = "empty user name";
pub const REASON_SHORT_DOMAIN: &str = "invalid domain";
pub const REASON_NO_EXTENSION: &str = "domain without extension (.com, .br, etc)";

// Dot-atom local part, then at least two hostname labels.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("email regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailVerdict {
    pub input: String,
    pub trimmed: String,
    pub valid: bool,
    pub user: String,
    pub domain: String,
    /// Present only for valid addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// Present only for invalid addresses; may be empty when the address
    /// fails the format check without tripping any structural rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<&'static str>>,
}

pub fn validate_email(raw: &str) -> ValidationResult<EmailVerdict> {
    ensure_present(raw, "email")?;

    let trimmed = raw.trim();
    let valid = is_well_formed(trimmed);

    let (user, domain) = trimmed.split_once('@').unwrap_or((trimmed, ""));

    let (reason, reasons) = if valid {
        (Some(REASON_VALID), None)
    } else {
        let reasons = structural_failures(trimmed, user, domain);
        tracing::debug!(
            failures = reasons.len(),
            "Email rejected by format check"
        );
        (None, Some(reasons))
    };

    Ok(EmailVerdict {
        input: raw.to_string(),
        trimmed: trimmed.to_string(),
        valid,
        user: user.to_string(),
        domain: domain.to_string(),
        reason,
        reasons,
    })
}

fn is_well_formed(address: &str) -> bool {
    if address.len() > MAX_ADDRESS_LEN {
        return false;
    }

    let Some((local, _)) = address.split_once('@') else {
        return false;
    };
    if local.len() > MAX_LOCAL_LEN {
        return false;
    }

    EMAIL_RE.is_match(address)
}

/// Heuristic explanations for a rejected address, in a fixed order.
fn structural_failures(address: &str, user: &str, domain: &str) -> Vec<&'static str> {
    let mut reasons = Vec::new();

    // A leading separator separates nothing, for '@' and '.' alike.
    if !has_inner(address, '@') {
        reasons.push(REASON_MISSING_AT);
    }
    if user.is_empty() {
        reasons.push(REASON_EMPTY_USER);
    }
    if domain.len() < 3 {
        reasons.push(REASON_SHORT_DOMAIN);
    }
    if !has_inner(domain, '.') {
        reasons.push(REASON_NO_EXTENSION);
    }

    reasons
}

fn has_inner(value: &str, separator: char) -> bool {
    value.find(separator).is_some_and(|idx| idx > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::ValidationError;

    #[test]
    fn test_valid_email_splits_parts() {
        let verdict = validate_email("user@example.com").unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.user, "user");
        assert_eq!(verdict.domain, "example.com");
        assert_eq!(verdict.reason, Some(REASON_VALID));
        assert_eq!(verdict.reasons, None);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let verdict = validate_email("  joao.silva+news@empresa.com.br \t").unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.input, "  joao.silva+news@empresa.com.br \t");
        assert_eq!(verdict.trimmed, "joao.silva+news@empresa.com.br");
        assert_eq!(verdict.domain, "empresa.com.br");
    }

    #[test]
    fn test_empty_domain_reports_domain_failures() {
        let verdict = validate_email("bad@").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.user, "bad");
        assert_eq!(verdict.domain, "");
        assert_eq!(
            verdict.reasons,
            Some(vec![REASON_SHORT_DOMAIN, REASON_NO_EXTENSION])
        );
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn test_missing_at_reports_every_matching_rule() {
        let verdict = validate_email("plainaddress").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.user, "plainaddress");
        assert_eq!(verdict.domain, "");
        assert_eq!(
            verdict.reasons,
            Some(vec![REASON_MISSING_AT, REASON_SHORT_DOMAIN, REASON_NO_EXTENSION])
        );
    }

    #[test]
    fn test_empty_user_part() {
        let verdict = validate_email("@example.com").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.user, "");
        assert_eq!(verdict.domain, "example.com");
        assert_eq!(
            verdict.reasons,
            Some(vec![REASON_MISSING_AT, REASON_EMPTY_USER])
        );
    }

    #[test]
    fn test_short_domain_counts_bytes() {
        // "çã" is two characters but four bytes.
        let verdict = validate_email("user@çã").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons, Some(vec![REASON_NO_EXTENSION]));

        let verdict = validate_email("user@ab").unwrap();
        assert_eq!(
            verdict.reasons,
            Some(vec![REASON_SHORT_DOMAIN, REASON_NO_EXTENSION])
        );
    }

    #[test]
    fn test_domain_without_extension() {
        let verdict = validate_email("user@localhost").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons, Some(vec![REASON_NO_EXTENSION]));

        let verdict = validate_email("user@.com").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons, Some(vec![REASON_NO_EXTENSION]));
    }

    #[test]
    fn test_invalid_without_structural_reason_keeps_empty_list() {
        let verdict = validate_email("us er@example.com").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons, Some(vec![]));

        let verdict = validate_email("user..name@example.com").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons, Some(vec![]));
    }

    #[test]
    fn test_splits_on_first_at() {
        let verdict = validate_email("a@b@example.com").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.user, "a");
        assert_eq!(verdict.domain, "b@example.com");
        assert_eq!(verdict.reasons, Some(vec![]));
    }

    #[test]
    fn test_length_limits() {
        let local = "a".repeat(MAX_LOCAL_LEN + 1);
        assert!(!validate_email(&format!("{local}@example.com")).unwrap().valid);

        let local = "a".repeat(MAX_LOCAL_LEN);
        assert!(validate_email(&format!("{local}@example.com")).unwrap().valid);
    }

    #[test]
    fn test_domain_label_rules() {
        assert!(!validate_email("user@-example.com").unwrap().valid);
        assert!(!validate_email("user@example..com").unwrap().valid);
        assert!(validate_email("user@sub-domain.example.org").unwrap().valid);
    }

    #[test]
    fn test_empty_email_is_missing_parameter() {
        assert_eq!(
            validate_email(""),
            Err(ValidationError::MissingParameter("email"))
        );
    }

    #[test]
    fn test_valid_verdict_serializes_single_reason() {
        let json = serde_json::to_value(validate_email("user@example.com").unwrap()).unwrap();
        assert_eq!(json["reason"], "valid email");
        assert!(json.get("reasons").is_none());
    }
}
