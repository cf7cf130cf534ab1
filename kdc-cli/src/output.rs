//! Report printing
//!
//! JSON output wraps a report in a `status`/`data` envelope. Text output
//! flattens the report into one `label : value` line per field, in the order
//! the report declares its fields, so values appear in the order the demo
//! produced them.

use crate::error::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

/// Output format for demo reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Serialize)]
struct SuccessEnvelope<'a, T: Serialize> {
    status: &'static str,
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    error: &'a str,
}

/// Render a report in the chosen format
pub fn render_success<T: Serialize>(format: OutputFormat, data: &T) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&SuccessEnvelope {
            status: "success",
            data,
        })?),
        OutputFormat::Text => {
            let mut lines = Vec::new();
            flatten("", &serde_json::to_value(data)?, &mut lines);
            Ok(align(&lines))
        }
    }
}

/// Render an error in the chosen format
pub fn render_error(format: OutputFormat, error: &str) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ErrorEnvelope {
            status: "error",
            error,
        })
        .unwrap_or_else(|_| format!("{{\"status\":\"error\",\"error\":{:?}}}", error)),
        OutputFormat::Text => format!("Error: {}", error),
    }
}

/// Print a report to stdout
pub fn print_success<T: Serialize>(format: OutputFormat, data: &T) -> Result<()> {
    println!("{}", render_success(format, data)?.trim_end());
    Ok(())
}

/// Print an error to stderr
pub fn print_error(format: OutputFormat, error: &str) {
    eprintln!("{}", render_error(format, error));
}

/// Collect `(label, value)` pairs; nested fields get dotted labels and
/// array items an `[i]` suffix
fn flatten(label: &str, value: &Value, lines: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let child = if label.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", label, key)
                };
                flatten(&child, val, lines);
            }
        }
        Value::Array(items) => {
            for (i, val) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", label, i), val, lines);
            }
        }
        Value::String(s) if s.contains('\n') => {
            // Multi-line values such as PEM blocks go below their label
            lines.push((label.to_string(), String::new()));
            for line in s.lines() {
                lines.push((String::new(), line.to_string()));
            }
        }
        Value::String(s) => lines.push((label.to_string(), s.clone())),
        other => lines.push((label.to_string(), other.to_string())),
    }
}

fn align(lines: &[(String, String)]) -> String {
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in lines {
        if label.is_empty() {
            out.push_str(&format!("  {}\n", value));
        } else {
            out.push_str(format!("{:<width$} : {}", label, value, width = width).trim_end());
            out.push('\n');
        }
    }
    out
}
