//! Member translation
//!
//! A member translator turns a property or field access in a query into a
//! provider SQL expression. Translators return `None` when they have no
//! mapping so another translator can try.

use super::sql_expression::SqlExpression;
use crate::diagnostics::{DiagnosticsLoggers, EventId, LoggerCategory};
use crate::models::ClrType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A property or field of an application type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberInfo {
    pub declaring_type: ClrType,
    pub name: String,
}

impl MemberInfo {
    pub fn new(declaring_type: ClrType, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// Translates a member access into SQL
pub trait MemberTranslator: Send + Sync {
    /// `instance` is `None` for static members
    fn translate(
        &self,
        instance: Option<&SqlExpression>,
        member: &MemberInfo,
        return_type: &ClrType,
    ) -> Option<SqlExpression>;
}

/// Tries a list of translators in registration order
#[derive(Default)]
pub struct CompositeMemberTranslator {
    translators: Vec<Box<dyn MemberTranslator>>,
}

impl CompositeMemberTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in SQL Server translators
    pub fn sql_server() -> Self {
        Self::new()
            .with_translator(super::sql_server::SqlServerStringMemberTranslator)
            .with_translator(super::sql_server::SqlServerDateTimeMemberTranslator)
    }

    pub fn with_translator(mut self, translator: impl MemberTranslator + 'static) -> Self {
        self.translators.push(Box::new(translator));
        self
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Translate, recording a debug diagnostic when nothing matched
    pub fn translate_logged(
        &self,
        instance: Option<&SqlExpression>,
        member: &MemberInfo,
        return_type: &ClrType,
        loggers: &DiagnosticsLoggers,
    ) -> Option<SqlExpression> {
        let translated = self.translate(instance, member, return_type);
        if translated.is_none() {
            loggers.logger(LoggerCategory::Query).debug(
                EventId::MemberTranslationMissing,
                format!("The member '{}' could not be translated to SQL.", member),
            );
        }
        translated
    }
}

impl MemberTranslator for CompositeMemberTranslator {
    fn translate(
        &self,
        instance: Option<&SqlExpression>,
        member: &MemberInfo,
        return_type: &ClrType,
    ) -> Option<SqlExpression> {
        self.translators
            .iter()
            .find_map(|t| t.translate(instance, member, return_type))
    }
}
