use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Prefix shared by every in-band failure marker.
pub const ERROR_PREFIX: &str = "Error:";

/// One element of the simulated data stack.
///
/// Serialized externally tagged, with numbers as decimal strings so that
/// hosts without native big integers can round-trip them:
/// `{"text": "a"}`, `{"number": "42"}`, `{"bool": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackValue {
    /// A text value (also used for error sentinels)
    Text(String),
    /// An unbounded integer
    Number(#[serde(with = "decimal")] BigInt),
    /// A boolean
    Bool(bool),
}

impl StackValue {
    pub fn text(s: impl Into<String>) -> Self {
        StackValue::Text(s.into())
    }

    pub fn number(n: impl Into<BigInt>) -> Self {
        StackValue::Number(n.into())
    }

    /// True for a text value carrying an `Error:` sentinel
    pub fn is_error(&self) -> bool {
        matches!(self, StackValue::Text(s) if s.starts_with(ERROR_PREFIX))
    }

    /// The sentinel message, if this value is one
    pub fn error_message(&self) -> Option<&str> {
        match self {
            StackValue::Text(s) if s.starts_with(ERROR_PREFIX) => Some(s),
            _ => None,
        }
    }

    /// Booleans become 0/1; numbers and text are returned unchanged.
    pub fn normalized(self) -> Self {
        match self {
            StackValue::Bool(b) => StackValue::Number(BigInt::from(u8::from(b))),
            other => other,
        }
    }

    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            StackValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StackValue::Text(_) => "text",
            StackValue::Number(_) => "number",
            StackValue::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Text(s) => write!(f, "{:?}", s),
            StackValue::Number(n) => write!(f, "{}", n),
            StackValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<bool> for StackValue {
    fn from(b: bool) -> Self {
        StackValue::Bool(b)
    }
}

impl From<i64> for StackValue {
    fn from(n: i64) -> Self {
        StackValue::Number(BigInt::from(n))
    }
}

impl From<i32> for StackValue {
    fn from(n: i32) -> Self {
        StackValue::Number(BigInt::from(n))
    }
}

impl From<BigInt> for StackValue {
    fn from(n: BigInt) -> Self {
        StackValue::Number(n)
    }
}

impl From<&str> for StackValue {
    fn from(s: &str) -> Self {
        StackValue::Text(s.to_string())
    }
}

impl From<String> for StackValue {
    fn from(s: String) -> Self {
        StackValue::Text(s)
    }
}

/// Decimal-string (de)serialization for big integers
mod decimal {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(n: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(n)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_booleans() {
        assert_eq!(StackValue::Bool(true).normalized(), StackValue::from(1));
        assert_eq!(StackValue::Bool(false).normalized(), StackValue::from(0));
        assert_eq!(StackValue::from("x").normalized(), StackValue::from("x"));
        assert_eq!(StackValue::from(7).normalized(), StackValue::from(7));
    }

    #[test]
    fn test_error_detection() {
        assert!(StackValue::from("Error: Insufficient items").is_error());
        assert!(!StackValue::from("error: lowercase").is_error());
        assert!(!StackValue::from(5).is_error());
        assert_eq!(
            StackValue::from("Error: Non-numeric values").error_message(),
            Some("Error: Non-numeric values")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(StackValue::from("a").to_string(), "\"a\"");
        assert_eq!(StackValue::from(-12).to_string(), "-12");
        assert_eq!(StackValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_json_shape() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let json = serde_json::to_string(&StackValue::Number(big.clone())).unwrap();
        assert_eq!(json, r#"{"number":"123456789012345678901234567890"}"#);

        let back: StackValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StackValue::Number(big));

        let text: StackValue = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(text, StackValue::from("hi"));
    }

    #[test]
    fn test_bad_number_rejected() {
        let result: Result<StackValue, _> = serde_json::from_str(r#"{"number":"12x"}"#);
        assert!(result.is_err());
    }
}
