use serde::{Serialize, Serializer};

use super::{ValidationResult, ensure_present, normalize_digits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneKind {
    Mobile,
    Landline,
}

impl PhoneKind {
    /// Classifies a bare digit string, area code included.
    fn from_digit_count(count: usize) -> Option<Self> {
        match count {
            11 => Some(PhoneKind::Mobile),
            10 => Some(PhoneKind::Landline),
            _ => None,
        }
    }

    /// Length of the subscriber prefix shown before the dash.
    fn prefix_len(self) -> usize {
        match self {
            PhoneKind::Mobile => 5,
            PhoneKind::Landline => 4,
        }
    }

    fn reason(self) -> &'static str {
        match self {
            PhoneKind::Mobile => "valid mobile phone",
            PhoneKind::Landline => "valid landline phone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneVerdict {
    pub input: String,
    pub digits: String,
    pub valid: bool,
    #[serde(rename = "type", serialize_with = "kind_or_empty")]
    pub kind: Option<PhoneKind>,
    pub formatted: String,
    pub digit_count: usize,
    pub reason: &'static str,
}

pub fn validate_phone(raw: &str) -> ValidationResult<PhoneVerdict> {
    ensure_present(raw, "phone")?;

    let digits = normalize_digits(raw);
    let digit_count = digits.len();
    let kind = PhoneKind::from_digit_count(digit_count);

    let (formatted, reason) = match kind {
        Some(kind) => (format_phone(&digits, kind), kind.reason()),
        None => (
            String::new(),
            "phone must have 10 digits (landline) or 11 digits (mobile) including area code",
        ),
    };

    tracing::debug!(
        digit_count,
        kind = ?kind,
        "Phone number classified"
    );

    Ok(PhoneVerdict {
        input: raw.to_string(),
        digits,
        valid: kind.is_some(),
        kind,
        formatted,
        digit_count,
        reason,
    })
}

fn format_phone(digits: &str, kind: PhoneKind) -> String {
    let (area, rest) = digits.split_at(2);
    let (prefix, line) = rest.split_at(kind.prefix_len());
    format!("({area}) {prefix}-{line}")
}

fn kind_or_empty<S: Serializer>(kind: &Option<PhoneKind>, serializer: S) -> Result<S::Ok, S::Error> {
    match kind {
        Some(kind) => kind.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::ValidationError;

    #[test]
    fn test_mobile_number() {
        let verdict = validate_phone("(11) 98765-4321").unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.digits, "11987654321");
        assert_eq!(verdict.kind, Some(PhoneKind::Mobile));
        assert_eq!(verdict.formatted, "(11) 98765-4321");
        assert_eq!(verdict.digit_count, 11);
        assert_eq!(verdict.reason, "valid mobile phone");
    }

    #[test]
    fn test_landline_number() {
        let verdict = validate_phone("1134567890").unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.kind, Some(PhoneKind::Landline));
        assert_eq!(verdict.formatted, "(11) 3456-7890");
        assert_eq!(verdict.digit_count, 10);
    }

    #[test]
    fn test_wrong_length_is_invalid() {
        let verdict = validate_phone("987654321").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.kind, None);
        assert_eq!(verdict.formatted, "");
        assert_eq!(verdict.digit_count, 9);
        assert!(verdict.reason.contains("10 digits"));

        let verdict = validate_phone("+55 11 98765-4321").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.digit_count, 13);
    }

    #[test]
    fn test_kind_serialization() {
        let mobile = serde_json::to_value(validate_phone("11987654321").unwrap()).unwrap();
        assert_eq!(mobile["type"], "mobile");

        let landline = serde_json::to_value(validate_phone("1134567890").unwrap()).unwrap();
        assert_eq!(landline["type"], "landline");

        let invalid = serde_json::to_value(validate_phone("123").unwrap()).unwrap();
        assert_eq!(invalid["type"], "");
        assert_eq!(invalid["formatted"], "");
    }

    #[test]
    fn test_empty_phone_is_missing_parameter() {
        assert_eq!(
            validate_phone(""),
            Err(ValidationError::MissingParameter("phone"))
        );
    }

    #[test]
    fn test_digitless_phone_is_a_negative_verdict() {
        let verdict = validate_phone("call me").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.digit_count, 0);
    }
}
