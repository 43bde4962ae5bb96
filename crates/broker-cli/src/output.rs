//! Rendering of command results as psql-style tables or JSON.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use broker_core::error::AppError;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Render rows in `format`.
pub fn render<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Table if rows.is_empty() => Ok("(no rows)".to_string()),
        OutputFormat::Table => Ok(Table::new(rows).with(Style::psql()).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Write rows to stdout.
pub fn emit<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> Result<(), AppError> {
    println!("{}", render(rows, format)?);
    Ok(())
}

/// Write a single row to stdout. JSON output is the bare object.
pub fn emit_one<T: Serialize + Tabled>(row: &T, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(row)?),
        OutputFormat::Table => emit(std::slice::from_ref(row), format)?,
    }
    Ok(())
}

/// Informational line on stderr, kept out of piped output.
pub fn note(msg: &str) {
    eprintln!("note: {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        client: String,
        license: String,
    }

    fn rows() -> Vec<Row> {
        vec![Row {
            client: "i-1".to_string(),
            license: "lic1.lic".to_string(),
        }]
    }

    #[test]
    fn test_render_table() {
        let table = render(&rows(), OutputFormat::Table).unwrap();
        assert!(table.contains("client"));
        assert!(table.contains("lic1.lic"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&rows(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["license"], "lic1.lic");
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render::<Row>(&[], OutputFormat::Table).unwrap(), "(no rows)");
    }
}
