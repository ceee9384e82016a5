//! Stable diagnostic codes such as `E309` and `W300`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::severity::Severity;

/// A stable identifier for one kind of finding.
///
/// Rendered and serialized as the severity letter followed by a three-digit
/// number. Codes never change meaning once published, so scripts may match
/// on them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DiagnosticCode {
    severity: Severity,
    number: u16,
}

impl DiagnosticCode {
    /// An `E` code.
    pub const fn error(number: u16) -> Self {
        Self {
            severity: Severity::Error,
            number,
        }
    }

    /// A `W` code.
    pub const fn warning(number: u16) -> Self {
        Self {
            severity: Severity::Warning,
            number,
        }
    }

    /// The severity implied by the prefix.
    pub fn severity(self) -> Severity {
        self.severity
    }

    /// The numeric part.
    pub fn number(self) -> u16 {
        self.number
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.severity.code_prefix(), self.number)
    }
}

impl FromStr for DiagnosticCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("invalid diagnostic code '{s}'");
        let mut chars = s.chars();
        let severity = match chars.next() {
            Some('E') => Severity::Error,
            Some('W') => Severity::Warning,
            _ => return Err(bad()),
        };
        let digits = chars.as_str();
        if digits.len() != 3 {
            return Err(bad());
        }
        let number = digits.parse().map_err(|_| bad())?;
        Ok(Self { severity, number })
    }
}

impl From<DiagnosticCode> for String {
    fn from(code: DiagnosticCode) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for DiagnosticCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_digit_numbers() {
        assert_eq!(DiagnosticCode::error(304).to_string(), "E304");
        assert_eq!(DiagnosticCode::warning(3).to_string(), "W003");
    }

    #[test]
    fn parses_its_own_output() {
        let code: DiagnosticCode = "W301".parse().unwrap();
        assert_eq!(code, DiagnosticCode::warning(301));
        assert_eq!(code.severity(), Severity::Warning);
        assert!("X300".parse::<DiagnosticCode>().is_err());
        assert!("E30".parse::<DiagnosticCode>().is_err());
        assert!("E3x0".parse::<DiagnosticCode>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&DiagnosticCode::error(309)).unwrap();
        assert_eq!(json, "\"E309\"");
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back.number(), 309);
    }
}
