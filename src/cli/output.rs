//! Output formatting for CLI

use crate::diagnostics::DiagnosticEvent;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the validation report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

/// Outcome of validating one model document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub model: String,
    pub valid: bool,
    pub entity_types: usize,
    pub warnings: Vec<DiagnosticEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Format a report as human-readable text
pub fn format_text_report(report: &ValidationReport) -> String {
    let mut output = String::new();

    if !report.warnings.is_empty() {
        output.push_str(&format!("\n⚠️  Warnings ({}):\n", report.warnings.len()));
        for warning in &report.warnings {
            output.push_str(&format!("  - [{}] {}\n", warning.id, warning.message));
        }
    }

    match &report.error {
        Some(error) => output.push_str(&format!("\n❌ {}: {}\n", report.model, error)),
        None => output.push_str(&format!(
            "\n✅ {}: {} entity type(s) validated\n",
            report.model, report.entity_types
        )),
    }

    output
}

pub fn format_report(report: &ValidationReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text_report(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_report_for_failure() {
        let report = ValidationReport {
            model: "model.yaml".into(),
            valid: false,
            entity_types: 2,
            warnings: Vec::new(),
            error: Some("boom".into()),
        };
        let text = format_text_report(&report);
        assert!(text.contains("❌ model.yaml: boom"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
