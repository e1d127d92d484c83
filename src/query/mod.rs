//! Query translation
//!
//! Member translators map property and field accesses on application types
//! to SQL Server expressions.

pub mod sql_expression;
pub mod sql_server;
pub mod translator;

pub use sql_expression::{SqlConstant, SqlExpression};
pub use sql_server::{SqlServerDateTimeMemberTranslator, SqlServerStringMemberTranslator};
pub use translator::{CompositeMemberTranslator, MemberInfo, MemberTranslator};
