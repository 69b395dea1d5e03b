use serde::Serialize;

use super::{ValidationResult, ensure_present};

const MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..40 => Strength::Weak,
            40..70 => Strength::Medium,
            _ => Strength::Strong,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Strength::Weak => Color::Red,
            Strength::Medium => Color::Yellow,
            Strength::Strong => Color::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub satisfied: bool,
    pub message: &'static str,
}

impl Criterion {
    fn evaluate(satisfied: bool, met: &'static str, unmet: &'static str) -> Self {
        Self {
            satisfied,
            message: if satisfied { met } else { unmet },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criteria {
    pub length: Criterion,
    pub uppercase: Criterion,
    pub lowercase: Criterion,
    pub digit: Criterion,
    pub special: Criterion,
}

impl Criteria {
    fn evaluate(password: &str, length: usize) -> Self {
        Self {
            length: Criterion::evaluate(
                length >= MIN_LENGTH,
                "has 8 or more characters",
                "needs at least 8 characters",
            ),
            uppercase: Criterion::evaluate(
                password.chars().any(|c| c.is_ascii_uppercase()),
                "contains uppercase letters",
                "add uppercase letters",
            ),
            lowercase: Criterion::evaluate(
                password.chars().any(|c| c.is_ascii_lowercase()),
                "contains lowercase letters",
                "add lowercase letters",
            ),
            digit: Criterion::evaluate(
                password.chars().any(|c| c.is_ascii_digit()),
                "contains digits",
                "add digits",
            ),
            special: Criterion::evaluate(
                password.chars().any(|c| !c.is_ascii_alphanumeric()),
                "contains special characters",
                "add special characters (!@#$%&*)",
            ),
        }
    }

    /// Sum of the weights of the satisfied criteria, at most 100.
    pub fn score(&self) -> u8 {
        [
            (&self.length, 25u8),
            (&self.uppercase, 25),
            (&self.lowercase, 25),
            (&self.digit, 15),
            (&self.special, 10),
        ]
        .into_iter()
        .filter(|(criterion, _)| criterion.satisfied)
        .map(|(_, weight)| weight)
        .sum()
    }
}

/// Strength report for a password. Holds no trace of the password itself
/// beyond its length in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordReport {
    pub masked: String,
    pub length: usize,
    pub score: u8,
    pub strength: Strength,
    pub color: Color,
    pub criteria: Criteria,
    pub recommendation: &'static str,
}

pub fn score_password(password: &str) -> ValidationResult<PasswordReport> {
    ensure_present(password, "password")?;

    let length = password.len();
    let criteria = Criteria::evaluate(password, length);
    let score = criteria.score();
    let strength = Strength::from_score(score);

    tracing::debug!(length, score, strength = ?strength, "Password scored");

    Ok(PasswordReport {
        masked: "*".repeat(length),
        length,
        score,
        strength,
        color: strength.color(),
        criteria,
        recommendation: if strength == Strength::Strong {
            "password adequate for use"
        } else {
            "improve your password following the criteria"
        },
    })
}
