//! SQL Server member translators

use super::sql_expression::SqlExpression;
use super::translator::{MemberInfo, MemberTranslator};
use crate::models::ClrType;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// `DATEPART` units for date and time components
static DATE_PART_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Year", "year"),
        ("Month", "month"),
        ("DayOfYear", "dayofyear"),
        ("Day", "day"),
        ("Hour", "hour"),
        ("Minute", "minute"),
        ("Second", "second"),
        ("Millisecond", "millisecond"),
    ])
});

/// `string.Length` as `CAST(LEN(x) AS int)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerStringMemberTranslator;

impl MemberTranslator for SqlServerStringMemberTranslator {
    fn translate(
        &self,
        instance: Option<&SqlExpression>,
        member: &MemberInfo,
        return_type: &ClrType,
    ) -> Option<SqlExpression> {
        let instance = instance?;
        if member.declaring_type != ClrType::String || member.name != "Length" {
            return None;
        }
        // LEN returns bigint for max-length arguments
        let len = SqlExpression::function("LEN", vec![instance.clone()], ClrType::Int64);
        Some(SqlExpression::cast(len, "int", return_type.clone()))
    }
}

/// `DateTime` and `DateTimeOffset` members
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDateTimeMemberTranslator;

impl SqlServerDateTimeMemberTranslator {
    fn translate_static(member: &MemberInfo, return_type: &ClrType) -> Option<SqlExpression> {
        let offset = member.declaring_type == ClrType::DateTimeOffset;
        let expression = match member.name.as_str() {
            "Now" => SqlExpression::function(
                if offset { "SYSDATETIMEOFFSET" } else { "GETDATE" },
                Vec::new(),
                return_type.clone(),
            ),
            "UtcNow" if offset => SqlExpression::cast(
                SqlExpression::function("SYSUTCDATETIME", Vec::new(), ClrType::DateTime),
                "datetimeoffset",
                return_type.clone(),
            ),
            "UtcNow" => SqlExpression::function("GETUTCDATE", Vec::new(), return_type.clone()),
            "Today" if !offset => SqlExpression::function(
                "CONVERT",
                vec![
                    SqlExpression::Fragment("date".into()),
                    SqlExpression::function("GETDATE", Vec::new(), ClrType::DateTime),
                ],
                return_type.clone(),
            ),
            _ => return None,
        };
        Some(expression)
    }

    fn translate_instance(
        instance: &SqlExpression,
        member: &MemberInfo,
        return_type: &ClrType,
    ) -> Option<SqlExpression> {
        if let Some(&part) = DATE_PART_MAPPING.get(member.name.as_str()) {
            return Some(SqlExpression::function(
                "DATEPART",
                vec![SqlExpression::Fragment(part.into()), instance.clone()],
                return_type.clone(),
            ));
        }

        match member.name.as_str() {
            "Date" => Some(SqlExpression::function(
                "CONVERT",
                vec![SqlExpression::Fragment("date".into()), instance.clone()],
                return_type.clone(),
            )),
            _ => None,
        }
    }
}

impl MemberTranslator for SqlServerDateTimeMemberTranslator {
    fn translate(
        &self,
        instance: Option<&SqlExpression>,
        member: &MemberInfo,
        return_type: &ClrType,
    ) -> Option<SqlExpression> {
        if !matches!(
            member.declaring_type,
            ClrType::DateTime | ClrType::DateTimeOffset
        ) {
            return None;
        }
        match instance {
            Some(instance) => Self::translate_instance(instance, member, return_type),
            None => Self::translate_static(member, return_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_date() -> SqlExpression {
        SqlExpression::column(Some("o"), "OrderDate", ClrType::DateTime)
    }

    #[test]
    fn test_string_length() {
        let name = SqlExpression::column(Some("c"), "Name", ClrType::String);
        let member = MemberInfo::new(ClrType::String, "Length");
        let sql = SqlServerStringMemberTranslator
            .translate(Some(&name), &member, &ClrType::Int32)
            .unwrap();
        assert_eq!(sql.to_string(), "CAST(LEN([c].[Name]) AS int)");
        assert_eq!(sql.clr_type(), Some(&ClrType::Int32));
    }

    #[test]
    fn test_string_translator_ignores_other_members() {
        let name = SqlExpression::column(None, "Name", ClrType::String);
        let member = MemberInfo::new(ClrType::String, "Chars");
        assert!(
            SqlServerStringMemberTranslator
                .translate(Some(&name), &member, &ClrType::Char)
                .is_none()
        );
    }

    #[test]
    fn test_date_parts() {
        let instance = order_date();
        let member = MemberInfo::new(ClrType::DateTime, "Year");
        let sql = SqlServerDateTimeMemberTranslator
            .translate(Some(&instance), &member, &ClrType::Int32)
            .unwrap();
        assert_eq!(sql.to_string(), "DATEPART(year, [o].[OrderDate])");

        let member = MemberInfo::new(ClrType::DateTime, "DayOfYear");
        let sql = SqlServerDateTimeMemberTranslator
            .translate(Some(&instance), &member, &ClrType::Int32)
            .unwrap();
        assert_eq!(sql.to_string(), "DATEPART(dayofyear, [o].[OrderDate])");
    }

    #[test]
    fn test_static_members() {
        let now = MemberInfo::new(ClrType::DateTime, "Now");
        let sql = SqlServerDateTimeMemberTranslator
            .translate(None, &now, &ClrType::DateTime)
            .unwrap();
        assert_eq!(sql.to_string(), "GETDATE()");

        let utc = MemberInfo::new(ClrType::DateTimeOffset, "UtcNow");
        let sql = SqlServerDateTimeMemberTranslator
            .translate(None, &utc, &ClrType::DateTimeOffset)
            .unwrap();
        assert_eq!(sql.to_string(), "CAST(SYSUTCDATETIME() AS datetimeoffset)");

        let today = MemberInfo::new(ClrType::DateTime, "Today");
        let sql = SqlServerDateTimeMemberTranslator
            .translate(None, &today, &ClrType::DateTime)
            .unwrap();
        assert_eq!(sql.to_string(), "CONVERT(date, GETDATE())");
    }
}
