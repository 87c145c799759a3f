//! Config command implementations

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::cli::ConfigCommand;
use crate::config::{write_default_config, AppConfig, RuntimeContext};
use crate::output::output_for_format;

pub fn run(ctx: &RuntimeContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => {
            println!("{}", ctx.config_path().display());
            Ok(())
        }
        ConfigCommand::Get { key: Some(key) } => {
            println!("{}", lookup(&ctx.config, &key)?);
            Ok(())
        }
        ConfigCommand::Get { key: None } => show(ctx),
        ConfigCommand::Reset => reset(ctx),
    }
}

/// Effective config: TOML for humans, JSON/YAML otherwise
fn show(ctx: &RuntimeContext) -> Result<()> {
    output_for_format(ctx, &ctx.config, || {
        let toml = toml::to_string_pretty(&ctx.config).context("serializing config")?;
        print!("{toml}");
        Ok(())
    })
}

fn reset(ctx: &RuntimeContext) -> Result<()> {
    write_default_config(ctx.config_path())?;
    println!(
        "Configuration reset to defaults at: {}",
        ctx.config_path().display()
    );
    Ok(())
}

/// Resolve a dotted key such as `api.timeout`
fn lookup(config: &AppConfig, key: &str) -> Result<String> {
    let root = serde_json::to_value(config)?;

    let value = key
        .split('.')
        .try_fold(&root, |node, part| node.get(part))
        .ok_or_else(|| {
            anyhow!(
                "Configuration key not found: {key}\nAvailable keys: {}",
                leaf_keys(&root, "").join(", ")
            )
        })?;

    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other)?,
    })
}

fn leaf_keys(node: &Value, prefix: &str) -> Vec<String> {
    match node {
        Value::Object(map) => map
            .iter()
            .flat_map(|(k, v)| {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                leaf_keys(v, &path)
            })
            .collect(),
        _ => vec![prefix.to_string()],
    }
}
