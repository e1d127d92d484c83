//! CLI command tests

#![cfg(feature = "cli")]

use relational_model_sdk::cli::CliError;
use relational_model_sdk::cli::commands::validate::{ValidateArgs, run_validate};
use relational_model_sdk::cli::output::{OutputFormat, format_report};
use relational_model_sdk::diagnostics::EventId;
use std::path::PathBuf;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const INVOICE_YAML: &str = r#"
entity_types:
  - name: Invoice
    properties:
      - name: Id
        clr_type: int
      - name: Amount
        clr_type: decimal
    keys:
      - properties: [Id]
        is_primary: true
"#;

mod validate_command_tests {
    use super::*;

    #[test]
    fn test_valid_model_reports_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_file(&dir, "invoice.yaml", INVOICE_YAML);

        let (report, error) = run_validate(&ValidateArgs {
            model,
            config: None,
            format: OutputFormat::Json,
        })
        .unwrap();

        assert!(error.is_none());
        assert!(report.valid);
        assert_eq!(report.entity_types, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].id, EventId::DecimalTypeDefaultWarning);

        let json: serde_json::Value =
            serde_json::from_str(&format_report(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["warnings"][0]["id"], "DecimalTypeDefaultWarning");
    }

    #[test]
    fn test_config_turns_warning_into_failure() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_file(&dir, "invoice.yaml", INVOICE_YAML);
        let config = write_file(
            &dir,
            "validator.toml",
            "[warnings]\nDecimalTypeDefaultWarning = \"throw\"\n",
        );

        let (report, error) = run_validate(&ValidateArgs {
            model,
            config: Some(config),
            format: OutputFormat::Text,
        })
        .unwrap();

        assert!(!report.valid);
        assert!(matches!(error, Some(CliError::Validation(_))));
        assert!(format_report(&report, OutputFormat::Text).unwrap().contains("❌"));
    }

    #[test]
    fn test_unreadable_model() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_validate(&ValidateArgs {
            model: dir.path().join("absent.yaml"),
            config: None,
            format: OutputFormat::Text,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::ModelLoad(_)));
    }
}
