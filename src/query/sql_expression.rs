//! SQL expression nodes produced by translators

use crate::models::ClrType;
use std::fmt;

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlConstant {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
}

impl fmt::Display for SqlConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlConstant::Null => f.write_str("NULL"),
            SqlConstant::Bool(b) => f.write_str(if *b { "CAST(1 AS bit)" } else { "CAST(0 AS bit)" }),
            SqlConstant::Int(i) => write!(f, "{}", i),
            SqlConstant::String(s) => write!(f, "N'{}'", s.replace('\'', "''")),
        }
    }
}

/// A typed SQL expression tree
///
/// `Display` renders T-SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpression {
    Column {
        table_alias: Option<String>,
        name: String,
        clr_type: ClrType,
    },
    Constant {
        value: SqlConstant,
        clr_type: ClrType,
    },
    /// Raw keyword argument such as a `DATEPART` unit
    Fragment(String),
    Function {
        name: String,
        arguments: Vec<SqlExpression>,
        clr_type: ClrType,
    },
    Cast {
        operand: Box<SqlExpression>,
        store_type: String,
        clr_type: ClrType,
    },
}

impl SqlExpression {
    pub fn column(table_alias: Option<&str>, name: impl Into<String>, clr_type: ClrType) -> Self {
        SqlExpression::Column {
            table_alias: table_alias.map(str::to_string),
            name: name.into(),
            clr_type,
        }
    }

    pub fn constant(value: SqlConstant, clr_type: ClrType) -> Self {
        SqlExpression::Constant { value, clr_type }
    }

    pub fn function(name: impl Into<String>, arguments: Vec<SqlExpression>, clr_type: ClrType) -> Self {
        SqlExpression::Function {
            name: name.into(),
            arguments,
            clr_type,
        }
    }

    pub fn cast(operand: SqlExpression, store_type: impl Into<String>, clr_type: ClrType) -> Self {
        SqlExpression::Cast {
            operand: Box::new(operand),
            store_type: store_type.into(),
            clr_type,
        }
    }

    /// Application type of the value, `None` for fragments
    pub fn clr_type(&self) -> Option<&ClrType> {
        match self {
            SqlExpression::Column { clr_type, .. }
            | SqlExpression::Constant { clr_type, .. }
            | SqlExpression::Function { clr_type, .. }
            | SqlExpression::Cast { clr_type, .. } => Some(clr_type),
            SqlExpression::Fragment(_) => None,
        }
    }
}

impl fmt::Display for SqlExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlExpression::Column {
                table_alias, name, ..
            } => match table_alias {
                Some(alias) => write!(f, "[{}].[{}]", alias, name),
                None => write!(f, "[{}]", name),
            },
            SqlExpression::Constant { value, .. } => write!(f, "{}", value),
            SqlExpression::Fragment(sql) => f.write_str(sql),
            SqlExpression::Function {
                name, arguments, ..
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", name, args.join(", "))
            }
            SqlExpression::Cast {
                operand,
                store_type,
                ..
            } => write!(f, "CAST({} AS {})", operand, store_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_expression() {
        let len = SqlExpression::function(
            "LEN",
            vec![SqlExpression::column(Some("c"), "Name", ClrType::String)],
            ClrType::Int64,
        );
        let expr = SqlExpression::cast(len, "int", ClrType::Int32);
        assert_eq!(expr.to_string(), "CAST(LEN([c].[Name]) AS int)");
        assert_eq!(expr.clr_type(), Some(&ClrType::Int32));
    }

    #[test]
    fn test_string_constant_is_escaped() {
        let expr = SqlExpression::constant(SqlConstant::String("O'Brien".into()), ClrType::String);
        assert_eq!(expr.to_string(), "N'O''Brien'");
    }
}
