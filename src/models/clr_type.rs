//! Value types of mapped properties

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of a mapped property as seen by the application
///
/// Serialized as its short name (`int`, `decimal?`, `byte[]`, ...) so model
/// documents stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClrType {
    Bool,
    Byte,
    Int16,
    Int32,
    Int64,
    Decimal,
    Single,
    Double,
    Char,
    String,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Guid,
    Bytes,
    /// Nullable wrapper around a value type
    Nullable(Box<ClrType>),
    /// Any type the provider has no special knowledge of
    Other(std::string::String),
}

impl ClrType {
    pub fn nullable(inner: ClrType) -> Self {
        ClrType::Nullable(Box::new(inner))
    }

    /// Strip a nullable wrapper, if any
    pub fn unwrap_nullable(&self) -> &ClrType {
        match self {
            ClrType::Nullable(inner) => inner.unwrap_nullable(),
            other => other,
        }
    }

    pub fn is_nullable_wrapper(&self) -> bool {
        matches!(self, ClrType::Nullable(_))
    }

    /// Whether a column of this type accepts NULL without a wrapper
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            ClrType::String | ClrType::Bytes | ClrType::Other(_)
        )
    }

    /// Integer types, including the single byte type
    pub fn is_integer(&self) -> bool {
        matches!(
            self.unwrap_nullable(),
            ClrType::Byte | ClrType::Int16 | ClrType::Int32 | ClrType::Int64
        )
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self.unwrap_nullable(), ClrType::Decimal)
    }

    pub fn is_byte(&self) -> bool {
        matches!(self.unwrap_nullable(), ClrType::Byte)
    }

    fn short_name(&self) -> std::string::String {
        match self {
            ClrType::Bool => "bool".into(),
            ClrType::Byte => "byte".into(),
            ClrType::Int16 => "short".into(),
            ClrType::Int32 => "int".into(),
            ClrType::Int64 => "long".into(),
            ClrType::Decimal => "decimal".into(),
            ClrType::Single => "float".into(),
            ClrType::Double => "double".into(),
            ClrType::Char => "char".into(),
            ClrType::String => "string".into(),
            ClrType::DateTime => "DateTime".into(),
            ClrType::DateTimeOffset => "DateTimeOffset".into(),
            ClrType::TimeSpan => "TimeSpan".into(),
            ClrType::Guid => "Guid".into(),
            ClrType::Bytes => "byte[]".into(),
            ClrType::Nullable(inner) => format!("{}?", inner.short_name()),
            ClrType::Other(name) => name.clone(),
        }
    }
}

impl fmt::Display for ClrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Error returned when a type name cannot be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid type name: '{0}'")]
pub struct ParseClrTypeError(pub std::string::String);

impl FromStr for ClrType {
    type Err = ParseClrTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseClrTypeError(s.to_string()));
        }
        if let Some(inner) = trimmed.strip_suffix('?') {
            let inner: ClrType = inner.parse()?;
            if inner.is_reference_type() || inner.is_nullable_wrapper() {
                return Err(ParseClrTypeError(s.to_string()));
            }
            return Ok(ClrType::nullable(inner));
        }

        let parsed = match trimmed {
            "bool" | "Boolean" => ClrType::Bool,
            "byte" | "Byte" => ClrType::Byte,
            "short" | "Int16" => ClrType::Int16,
            "int" | "Int32" => ClrType::Int32,
            "long" | "Int64" => ClrType::Int64,
            "decimal" | "Decimal" => ClrType::Decimal,
            "float" | "Single" => ClrType::Single,
            "double" | "Double" => ClrType::Double,
            "char" | "Char" => ClrType::Char,
            "string" | "String" => ClrType::String,
            "DateTime" => ClrType::DateTime,
            "DateTimeOffset" => ClrType::DateTimeOffset,
            "TimeSpan" => ClrType::TimeSpan,
            "Guid" => ClrType::Guid,
            "byte[]" => ClrType::Bytes,
            other => ClrType::Other(other.to_string()),
        };
        Ok(parsed)
    }
}

impl TryFrom<std::string::String> for ClrType {
    type Error = ParseClrTypeError;

    fn try_from(value: std::string::String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClrType> for std::string::String {
    fn from(value: ClrType) -> Self {
        value.short_name()
    }
}
