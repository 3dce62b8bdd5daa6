//! Setting value kinds and the tagged union that stores them.
//!
//! A setting's kind is fixed by its default value at registration time.
//! Values are stored in [`SettingValue`], a closed enum over the supported
//! kinds, so a kind mismatch is detected by matching on the variant rather
//! than by a runtime cast.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::OptionError;

/// Kind of value a setting holds.
///
/// # Examples
///
/// ```
/// use clom_core::ValueKind;
///
/// let kind: ValueKind = "float".parse().unwrap();
/// assert_eq!(kind, ValueKind::Float);
/// assert_eq!(ValueKind::String.to_string(), "string");
/// assert!("u128".parse::<ValueKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// 32-bit signed integer.
    Int,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Single character.
    Char,
    /// Owned string.
    String,
}

impl ValueKind {
    /// Canonical lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" | "i32" => Ok(Self::Int),
            "float" | "f32" => Ok(Self::Float),
            "double" | "f64" => Ok(Self::Double),
            "char" => Ok(Self::Char),
            "string" | "str" => Ok(Self::String),
            other => Err(OptionError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Current value of a setting.
///
/// Serializes adjacently tagged, e.g. `{"kind":"float","value":5.2}`.
///
/// # Examples
///
/// ```
/// use clom_core::{SettingValue, ValueKind};
///
/// let v = SettingValue::parse(ValueKind::Int, "-42").unwrap();
/// assert_eq!(v, SettingValue::Int(-42));
/// assert_eq!(v.kind(), ValueKind::Int);
///
/// assert_eq!(SettingValue::from("Mr X").kind(), ValueKind::String);
/// assert!(SettingValue::parse(ValueKind::Int, "4.5").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SettingValue {
    Int(i32),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
}

impl SettingValue {
    /// Returns the kind of the stored value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Char(_) => ValueKind::Char,
            Self::String(_) => ValueKind::String,
        }
    }

    /// Parses a command-line token as a value of `kind`.
    ///
    /// Integers are base-10 `i32`. Floats must parse to a finite number.
    /// A character setting takes the first character of the token as-is,
    /// and a string setting takes the whole token. Returns `None` when the
    /// token is not a valid representation of `kind`.
    pub fn parse(kind: ValueKind, token: &str) -> Option<Self> {
        match kind {
            ValueKind::Int => token.parse().ok().map(Self::Int),
            ValueKind::Float => token
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Float),
            ValueKind::Double => token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Double),
            ValueKind::Char => token.chars().next().map(Self::Char),
            ValueKind::String => Some(Self::String(token.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Rust types that can be read back out of a setting.
///
/// Implemented for exactly the supported kinds, so requesting any other
/// type from [`Registry::get_setting_value`](crate::Registry::get_setting_value)
/// is a compile error.
pub trait SettingType: Into<SettingValue> + Sized {
    /// Kind this type maps to.
    const KIND: ValueKind;

    /// Extracts a copy of the value if `value` holds this kind.
    fn from_value(value: &SettingValue) -> Option<Self>;
}

macro_rules! impl_setting_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for SettingValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl SettingType for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: &SettingValue) -> Option<Self> {
                match value {
                    SettingValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    )*};
}
impl_setting_type!(
    i32 => Int,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => String,
);
