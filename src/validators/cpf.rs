use serde::Serialize;

use super::{ValidationResult, ensure_present, normalize_digits};

const CPF_LENGTH: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpfVerdict {
    pub input: String,
    pub formatted: String,
    pub valid: bool,
    pub reason: &'static str,
}

/// Validates a CPF, accepting any punctuation around the 11 digits.
///
/// Inputs that do not carry 11 digits echo the bare digits in `formatted`;
/// everything else is rendered as `XXX.XXX.XXX-XX` even when the check
/// digits fail.
pub fn validate_cpf(raw: &str) -> ValidationResult<CpfVerdict> {
    ensure_present(raw, "cpf")?;

    let digits = normalize_digits(raw);
    let verdict = |formatted: String, valid: bool, reason: &'static str| CpfVerdict {
        input: raw.to_string(),
        formatted,
        valid,
        reason,
    };

    if digits.len() != CPF_LENGTH {
        tracing::debug!(
            digit_count = digits.len(),
            "CPF rejected: wrong number of digits"
        );
        return Ok(verdict(digits, false, "CPF must contain 11 digits"));
    }

    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();

    if values.iter().all(|&d| d == values[0]) {
        tracing::debug!("CPF rejected: all digits equal");
        return Ok(verdict(
            format_cpf(&digits),
            false,
            "CPF with all digits equal is invalid",
        ));
    }

    let first = check_digit(&values[..9]);
    let second = check_digit(&values[..10]);
    let valid = values[9] == first && values[10] == second;

    tracing::debug!(valid, "CPF check digits evaluated");

    Ok(verdict(
        format_cpf(&digits),
        valid,
        if valid {
            "valid CPF"
        } else {
            "check digits incorrect"
        },
    ))
}

/// Modulo-11 check digit over `digits`, weights counting down to 2.
pub(crate) fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (top - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

/// Expects exactly 11 ASCII digits.
fn format_cpf(digits: &str) -> String {
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::ValidationError;

    fn with_check_digits(base: [u32; 9]) -> String {
        let mut values = base.to_vec();
        values.push(check_digit(&values));
        values.push(check_digit(&values));
        values.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect()
    }

    #[test]
    fn test_known_valid_cpf() {
        let verdict = validate_cpf("52998224725").unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.formatted, "529.982.247-25");
        assert_eq!(verdict.reason, "valid CPF");
    }

    #[test]
    fn test_punctuated_cpf_keeps_original_input() {
        let verdict = validate_cpf("529.982.247-25").unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.input, "529.982.247-25");
        assert_eq!(verdict.formatted, "529.982.247-25");
    }

    #[test]
    fn test_wrong_check_digit() {
        let verdict = validate_cpf("52998224726").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.formatted, "529.982.247-26");
        assert_eq!(verdict.reason, "check digits incorrect");
    }

    #[test]
    fn test_all_equal_digits_rejected() {
        for d in 0..=9 {
            let raw = d.to_string().repeat(11);
            let verdict = validate_cpf(&raw).unwrap();
            assert!(!verdict.valid, "{raw} should be rejected");
            assert_eq!(verdict.reason, "CPF with all digits equal is invalid");
            assert_eq!(verdict.formatted.len(), 14);
        }
    }

    #[test]
    fn test_wrong_length_echoes_digits() {
        let verdict = validate_cpf("123.456.789").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.formatted, "123456789");
        assert_eq!(verdict.reason, "CPF must contain 11 digits");

        let verdict = validate_cpf("no digits here").unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.formatted, "");
    }

    #[test]
    fn test_generated_cpfs_are_valid() {
        let bases = [
            [1, 2, 3, 4, 5, 6, 7, 8, 9],
            [0, 0, 0, 0, 0, 0, 0, 0, 1],
            [9, 8, 7, 6, 5, 4, 3, 2, 1],
            [3, 1, 4, 1, 5, 9, 2, 6, 5],
            [1, 1, 1, 4, 4, 4, 7, 7, 7],
        ];
        for base in bases {
            let cpf = with_check_digits(base);
            assert!(validate_cpf(&cpf).unwrap().valid, "{cpf} should be valid");
        }
    }

    #[test]
    fn test_check_digit_matches_known_values() {
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), 2);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7, 2]), 5);
        assert_eq!(with_check_digits([1, 2, 3, 4, 5, 6, 7, 8, 9]), "12345678909");
    }

    #[test]
    fn test_empty_cpf_is_missing_parameter() {
        assert_eq!(
            validate_cpf(""),
            Err(ValidationError::MissingParameter("cpf"))
        );
    }

    #[test]
    fn test_cpf_validation_is_idempotent() {
        assert_eq!(validate_cpf("529.982.247-25"), validate_cpf("529.982.247-25"));
    }
}
