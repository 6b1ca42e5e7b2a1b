//! A single UCI option value.
//!
//! The UCI store has no schema: booleans, integers, and plain strings all
//! travel as JSON strings. Decoding therefore guesses a variant in a fixed
//! order (boolean, integer, list, string) and the `as_*` methods let callers
//! ask for whichever interpretation they actually need.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{DecodeError, OptionType, OptionTypeMismatchError};

/// Spellings UCI accepts for a true boolean.
pub const TRUTHY_TOKENS: [&str; 5] = ["1", "yes", "on", "true", "enabled"];

/// Spellings UCI accepts for a false boolean.
pub const FALSY_TOKENS: [&str; 5] = ["0", "no", "off", "false", "disabled"];

/// Map a UCI boolean token to its logical value.
#[must_use]
pub fn parse_boolean_token(token: &str) -> Option<bool> {
    if TRUTHY_TOKENS.contains(&token) {
        Some(true)
    } else if FALSY_TOKENS.contains(&token) {
        Some(false)
    } else {
        None
    }
}

/// An immutable UCI option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOption {
    /// A logical value plus the exact token it was read from.
    Boolean { value: bool, token: String },
    Integer(i64),
    ListString(Vec<String>),
    String(String),
}

impl UciOption {
    /// A boolean carrying the canonical `"1"`/`"0"` token.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        let token = if value { "1" } else { "0" };
        UciOption::Boolean {
            value,
            token: token.to_string(),
        }
    }

    #[must_use]
    pub fn integer(value: i64) -> Self {
        UciOption::Integer(value)
    }

    #[must_use]
    pub fn list_string<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UciOption::ListString(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        UciOption::String(value.into())
    }

    /// The variant this value was stored as.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        match self {
            UciOption::Boolean { .. } => OptionType::Boolean,
            UciOption::Integer(_) => OptionType::Integer,
            UciOption::ListString(_) => OptionType::ListString,
            UciOption::String(_) => OptionType::String,
        }
    }

    fn mismatch(&self, expected: OptionType) -> OptionTypeMismatchError {
        OptionTypeMismatchError {
            expected,
            actual: self.option_type(),
        }
    }

    /// Interpret the value as a boolean.
    ///
    /// # Errors
    ///
    /// Fails unless the value was stored as a boolean.
    pub fn as_boolean(&self) -> Result<bool, OptionTypeMismatchError> {
        match self {
            UciOption::Boolean { value, .. } => Ok(*value),
            _ => Err(self.mismatch(OptionType::Boolean)),
        }
    }

    /// Interpret the value as an integer.
    ///
    /// A boolean read from `"0"` or `"1"` coerces to 0 or 1.
    ///
    /// # Errors
    ///
    /// Fails for lists, strings, and booleans spelled any other way.
    pub fn as_integer(&self) -> Result<i64, OptionTypeMismatchError> {
        match self {
            UciOption::Integer(n) => Ok(*n),
            UciOption::Boolean { token, .. } => match token.as_str() {
                "0" => Ok(0),
                "1" => Ok(1),
                _ => Err(self.mismatch(OptionType::Integer)),
            },
            _ => Err(self.mismatch(OptionType::Integer)),
        }
    }

    /// Interpret the value as a list of strings.
    ///
    /// # Errors
    ///
    /// Fails unless the value was stored as a list.
    pub fn as_list_string(&self) -> Result<Vec<String>, OptionTypeMismatchError> {
        match self {
            UciOption::ListString(values) => Ok(values.clone()),
            _ => Err(self.mismatch(OptionType::ListString)),
        }
    }

    /// Interpret the value as a string.
    ///
    /// Integers render in decimal. Booleans return their original token when
    /// it is one of the canonical UCI spellings.
    ///
    /// # Errors
    ///
    /// Fails for lists and for booleans whose token is not canonical.
    pub fn as_string(&self) -> Result<String, OptionTypeMismatchError> {
        match self {
            UciOption::String(s) => Ok(s.clone()),
            UciOption::Integer(n) => Ok(n.to_string()),
            UciOption::Boolean { token, .. } if parse_boolean_token(token).is_some() => {
                Ok(token.clone())
            }
            _ => Err(self.mismatch(OptionType::String)),
        }
    }

    /// Decode a raw JSON value, committing to the first variant that parses.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] carrying every rejected interpretation when
    /// none of them apply.
    pub fn from_json(raw: &Value) -> Result<Self, DecodeError> {
        let boolean = match decode_boolean(raw) {
            Ok(option) => return Ok(option),
            Err(e) => e,
        };
        let integer = match decode_integer(raw) {
            Ok(option) => return Ok(option),
            Err(e) => e,
        };
        let list_string = match decode_list_string(raw) {
            Ok(option) => return Ok(option),
            Err(e) => e,
        };
        let string = match decode_string(raw) {
            Ok(option) => return Ok(option),
            Err(e) => e,
        };

        Err(DecodeError {
            boolean,
            integer,
            list_string,
            string,
        })
    }

    /// Encode into the JSON shape the device expects.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            UciOption::Boolean { value, .. } => Value::Bool(*value),
            UciOption::Integer(n) => Value::String(n.to_string()),
            UciOption::ListString(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
            UciOption::String(s) => Value::String(s.clone()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode_boolean(raw: &Value) -> Result<UciOption, String> {
    match raw {
        Value::Bool(value) => Ok(UciOption::Boolean {
            value: *value,
            token: value.to_string(),
        }),
        Value::String(s) => parse_boolean_token(s)
            .map(|value| UciOption::Boolean {
                value,
                token: s.clone(),
            })
            .ok_or_else(|| format!("{s:?} is not a boolean token")),
        other => Err(format!("expected boolean or string, got {}", json_kind(other))),
    }
}

fn decode_integer(raw: &Value) -> Result<UciOption, String> {
    let Value::String(s) = raw else {
        return Err(format!("expected string, got {}", json_kind(raw)));
    };
    s.parse::<i64>()
        .map(UciOption::Integer)
        .map_err(|e| format!("{s:?} is not an integer: {e}"))
}

fn decode_list_string(raw: &Value) -> Result<UciOption, String> {
    let Value::Array(items) = raw else {
        return Err(format!("expected array, got {}", json_kind(raw)));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(format!(
                "element {i} is {}, expected string",
                json_kind(other)
            )),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(UciOption::ListString)
}

fn decode_string(raw: &Value) -> Result<UciOption, String> {
    match raw {
        Value::String(s) => Ok(UciOption::String(s.clone())),
        other => Err(format!("expected string, got {}", json_kind(other))),
    }
}

impl Serialize for UciOption {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            UciOption::Boolean { value, .. } => serializer.serialize_bool(*value),
            UciOption::Integer(n) => serializer.serialize_str(&n.to_string()),
            UciOption::ListString(values) => serializer.collect_seq(values),
            UciOption::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for UciOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        UciOption::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

impl From<bool> for UciOption {
    fn from(value: bool) -> Self {
        UciOption::boolean(value)
    }
}

impl From<i64> for UciOption {
    fn from(value: i64) -> Self {
        UciOption::Integer(value)
    }
}

impl From<i32> for UciOption {
    fn from(value: i32) -> Self {
        UciOption::Integer(i64::from(value))
    }
}

impl From<Vec<String>> for UciOption {
    fn from(values: Vec<String>) -> Self {
        UciOption::ListString(values)
    }
}

impl From<&str> for UciOption {
    fn from(value: &str) -> Self {
        UciOption::String(value.to_string())
    }
}

impl From<String> for UciOption {
    fn from(value: String) -> Self {
        UciOption::String(value)
    }
}
