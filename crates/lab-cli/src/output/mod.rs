use std::fmt::Write as _;

use lab_sandbox::QueryOutcome;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a query outcome in the requested format.
pub fn render(outcome: &QueryOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Raw => Ok(serde_json::to_string(outcome)?),
        OutputFormat::Table => Ok(render_table(outcome)),
    }
}

/// Print a query outcome to stdout in the requested format.
pub fn print(outcome: &QueryOutcome, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(outcome, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(outcome: &QueryOutcome) -> String {
    if outcome.result.is_empty() {
        return String::from("(no rows)");
    }

    let headers = outcome.columns.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = outcome
        .result
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| row.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut out = table::render(&headers, &rows);
    let plural = if rows.len() == 1 { "" } else { "s" };
    let _ = write!(out, "\n({} row{plural})", rows.len());
    out
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
