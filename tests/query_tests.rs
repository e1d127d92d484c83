//! Member translation tests

use relational_model_sdk::diagnostics::{DiagnosticsLoggers, EventId, LoggerCategory, MemorySink};
use relational_model_sdk::models::ClrType;
use relational_model_sdk::query::{
    CompositeMemberTranslator, MemberInfo, MemberTranslator, SqlExpression,
};
use std::sync::Arc;

/// Translates `Customer.FullName` into a concatenation
struct FullNameTranslator;

impl MemberTranslator for FullNameTranslator {
    fn translate(
        &self,
        instance: Option<&SqlExpression>,
        member: &MemberInfo,
        return_type: &ClrType,
    ) -> Option<SqlExpression> {
        if member.declaring_type != ClrType::Other("Customer".into()) || member.name != "FullName" {
            return None;
        }
        let instance = instance?;
        Some(SqlExpression::function(
            "CONCAT",
            vec![instance.clone()],
            return_type.clone(),
        ))
    }
}

mod composite_translator_tests {
    use super::*;

    #[test]
    fn test_first_matching_translator_wins() {
        let translator = CompositeMemberTranslator::sql_server().with_translator(FullNameTranslator);
        assert_eq!(translator.len(), 3);

        let name = SqlExpression::column(Some("c"), "Name", ClrType::String);
        let length = translator
            .translate(
                Some(&name),
                &MemberInfo::new(ClrType::String, "Length"),
                &ClrType::Int32,
            )
            .unwrap();
        assert_eq!(length.to_string(), "CAST(LEN([c].[Name]) AS int)");

        let customer = SqlExpression::column(Some("c"), "Name", ClrType::Other("Customer".into()));
        let full_name = translator
            .translate(
                Some(&customer),
                &MemberInfo::new(ClrType::Other("Customer".into()), "FullName"),
                &ClrType::String,
            )
            .unwrap();
        assert_eq!(full_name.to_string(), "CONCAT([c].[Name])");
    }

    #[test]
    fn test_date_members() {
        let translator = CompositeMemberTranslator::sql_server();
        let shipped = SqlExpression::column(Some("o"), "ShippedAt", ClrType::DateTimeOffset);

        let month = translator
            .translate(
                Some(&shipped),
                &MemberInfo::new(ClrType::DateTimeOffset, "Month"),
                &ClrType::Int32,
            )
            .unwrap();
        assert_eq!(month.to_string(), "DATEPART(month, [o].[ShippedAt])");

        let date = translator
            .translate(
                Some(&shipped),
                &MemberInfo::new(ClrType::DateTimeOffset, "Date"),
                &ClrType::DateTime,
            )
            .unwrap();
        assert_eq!(date.to_string(), "CONVERT(date, [o].[ShippedAt])");

        let utc_now = translator
            .translate(None, &MemberInfo::new(ClrType::DateTime, "UtcNow"), &ClrType::DateTime)
            .unwrap();
        assert_eq!(utc_now.to_string(), "GETUTCDATE()");
    }

    #[test]
    fn test_unknown_member_is_untranslated() {
        let translator = CompositeMemberTranslator::sql_server();
        let order_date = SqlExpression::column(None, "OrderDate", ClrType::DateTime);
        assert!(
            translator
                .translate(
                    Some(&order_date),
                    &MemberInfo::new(ClrType::DateTime, "Ticks"),
                    &ClrType::Int64,
                )
                .is_none()
        );
        assert!(
            translator
                .translate(None, &MemberInfo::new(ClrType::String, "Empty"), &ClrType::String)
                .is_none()
        );
    }

    #[test]
    fn test_missing_translation_is_logged() {
        let sink = Arc::new(MemorySink::new());
        let loggers = DiagnosticsLoggers::new(sink.clone());
        let translator = CompositeMemberTranslator::new();
        assert!(translator.is_empty());

        let result = translator.translate_logged(
            None,
            &MemberInfo::new(ClrType::Guid, "Empty"),
            &ClrType::Guid,
            &loggers,
        );
        assert!(result.is_none());
        assert_eq!(sink.count(EventId::MemberTranslationMissing), 1);
        let event = &sink.events()[0];
        assert_eq!(event.category, LoggerCategory::Query);
        assert!(event.message.contains("Guid.Empty"));
    }
}
