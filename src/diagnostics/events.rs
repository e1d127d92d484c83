//! Diagnostic event definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a logger is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoggerCategory {
    /// Model building and conventions
    Model,
    /// Model validation
    ModelValidation,
    /// Query translation
    Query,
}

impl LoggerCategory {
    pub fn name(&self) -> &'static str {
        match self {
            LoggerCategory::Model => "model",
            LoggerCategory::ModelValidation => "model.validation",
            LoggerCategory::Query => "query",
        }
    }
}

impl fmt::Display for LoggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a diagnostic event
///
/// Serialized by name so it can key configuration maps in any format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventId {
    /// Decimal column left on the default precision and scale
    DecimalTypeDefaultWarning,
    /// Single-byte property backed by an identity column
    ByteIdentityColumnWarning,
    /// A member access had no SQL translation
    MemberTranslationMissing,
}

impl EventId {
    pub fn name(&self) -> &'static str {
        match self {
            EventId::DecimalTypeDefaultWarning => "DecimalTypeDefaultWarning",
            EventId::ByteIdentityColumnWarning => "ByteIdentityColumnWarning",
            EventId::MemberTranslationMissing => "MemberTranslationMissing",
        }
    }

    pub fn category(&self) -> LoggerCategory {
        match self {
            EventId::DecimalTypeDefaultWarning | EventId::ByteIdentityColumnWarning => {
                LoggerCategory::ModelValidation
            }
            EventId::MemberTranslationMissing => LoggerCategory::Query,
        }
    }
}

impl FromStr for EventId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            EventId::DecimalTypeDefaultWarning,
            EventId::ByteIdentityColumnWarning,
            EventId::MemberTranslationMissing,
        ]
        .into_iter()
        .find(|id| id.name() == s)
        .ok_or_else(|| format!("Unknown event id: {}", s))
    }
}

impl TryFrom<String> for EventId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Debug,
    Warning,
}

/// A logged diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub id: EventId,
    pub category: LoggerCategory,
    pub level: DiagnosticLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.message)
    }
}
