//! Output formatting utilities
//!
//! Handles JSON, YAML, and table output formats.

use std::io::IsTerminal;

use anyhow::Result;
use serde::Serialize;
use tabled::settings::object::Rows;
use tabled::settings::{Remove, Style};
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::config::RuntimeContext;

/// Format and print data according to the configured output format
pub fn print_output<T: Serialize>(ctx: &RuntimeContext, data: &T) -> Result<()> {
    let output = render(ctx.output_format(), std::io::stdout().is_terminal(), data)?;
    println!("{output}");
    Ok(())
}

/// Print machine-readable output for json/yaml (or piped auto), otherwise run `human`
pub fn output_for_format<T, F>(ctx: &RuntimeContext, data: &T, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> Result<()>,
{
    if is_machine_format(ctx.output_format(), std::io::stdout().is_terminal()) {
        print_output(ctx, data)
    } else {
        human()
    }
}

fn is_machine_format(format: OutputFormat, is_tty: bool) -> bool {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => true,
        OutputFormat::Auto => !is_tty,
        _ => false,
    }
}

/// Serialize data for the given format
fn render<T: Serialize>(format: OutputFormat, is_tty: bool, data: &T) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Json if is_tty => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Auto if is_tty => Ok(serde_json::to_string_pretty(data)?),
        // Table has no generic rendering; pretty JSON is the fallback
        OutputFormat::Table => Ok(serde_json::to_string_pretty(data)?),
        _ => Ok(serde_json::to_string(data)?),
    }
}

/// Print a table from items that implement Tabled
pub fn print_table<T: Tabled>(ctx: &RuntimeContext, items: &[T]) -> Result<()> {
    let table = build_table(items, ctx.no_headers());
    println!("{table}");
    Ok(())
}

fn build_table<T: Tabled>(items: &[T], no_headers: bool) -> Table {
    let mut table = Table::new(items);
    table.with(Style::sharp());

    if no_headers {
        table.with(Remove::row(Rows::first()));
    }

    table
}

/// "N/A" for missing values
pub fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}
