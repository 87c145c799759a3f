//! Configuration management for mlbq
//!
//! Supports:
//! - TOML config file at XDG locations
//! - Environment variable overrides
//! - Command-line argument overrides

use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};
use config::{Config, Environment, File, FileFormat};
use env_logger::fmt::WriteStyle;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::{GlobalOpts, OutputFormat};

const APP_NAME: &str = env!("CARGO_PKG_NAME");

pub const DEFAULT_STATS_URL: &str = "https://statsapi.mlb.com/api/v1";
pub const DEFAULT_SCORES_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb";

/// Runtime context containing resolved configuration
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    pub global: GlobalOpts,
    pub config: AppConfig,
    config_path: PathBuf,
}

impl RuntimeContext {
    pub fn new(global: &GlobalOpts) -> Result<Self> {
        let config_path = resolve_config_path(global.config.as_ref())?;
        let config = load_config(&config_path, global)?;

        Ok(Self {
            global: global.clone(),
            config,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn init_logging(&self) -> Result<()> {
        if self.global.quiet {
            log::set_max_level(LevelFilter::Off);
            return Ok(());
        }

        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.config.logging.level),
        );

        if let Some(level) = self.flag_log_level() {
            builder.filter_level(level);
        }

        let force_color = env::var_os("FORCE_COLOR").is_some();
        let disable_color = self.global.no_color
            || env::var_os("NO_COLOR").is_some()
            || (!force_color && !std::io::stderr().is_terminal());

        if disable_color {
            builder.write_style(WriteStyle::Never);
        } else if force_color {
            builder.write_style(WriteStyle::Always);
        } else {
            builder.write_style(WriteStyle::Auto);
        }

        builder.try_init().or_else(|err| {
            if self.global.verbose > 0 {
                eprintln!("logger already initialized: {err}");
            }
            Ok(())
        })
    }

    /// Level forced by command-line flags; `None` leaves config/RUST_LOG in charge
    fn flag_log_level(&self) -> Option<LevelFilter> {
        if self.global.trace {
            Some(LevelFilter::Trace)
        } else if self.global.debug {
            Some(LevelFilter::Debug)
        } else {
            match self.global.verbose {
                0 => None,
                1 => Some(LevelFilter::Info),
                2 => Some(LevelFilter::Debug),
                _ => Some(LevelFilter::Trace),
            }
        }
    }

    /// Base URL of the MLB Stats API
    pub fn stats_url(&self) -> &str {
        self.global
            .stats_url
            .as_deref()
            .unwrap_or(&self.config.api.stats_url)
    }

    /// Base URL of the ESPN MLB scoreboard API
    pub fn scores_url(&self) -> &str {
        self.global
            .scores_url
            .as_deref()
            .unwrap_or(&self.config.api.scores_url)
    }

    /// Get the effective timeout in seconds
    pub fn timeout(&self) -> u64 {
        self.global.timeout.unwrap_or(self.config.api.timeout)
    }

    pub fn sport_id(&self) -> u32 {
        self.config.api.sport_id
    }

    /// Season to query: flag, then config, then the current calendar year
    pub fn season(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.config.defaults.season.clone())
            .unwrap_or_else(|| Local::now().year().to_string())
    }

    /// League ids for standings: flag, then config
    pub fn leagues(&self, flag: Option<&str>) -> String {
        flag.unwrap_or(&self.config.defaults.leagues).to_string()
    }

    /// Get the effective output format
    pub fn output_format(&self) -> OutputFormat {
        if self.global.json {
            return OutputFormat::Json;
        }
        self.global
            .output_format
            .unwrap_or(match self.config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "yaml" => OutputFormat::Yaml,
                "table" => OutputFormat::Table,
                _ => OutputFormat::Auto,
            })
    }

    pub fn no_headers(&self) -> bool {
        self.global.no_headers || self.config.output.no_headers
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub stats_url: String,
    pub scores_url: String,
    pub timeout: u64,
    pub sport_id: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            stats_url: DEFAULT_STATS_URL.to_string(),
            scores_url: DEFAULT_SCORES_URL.to_string(),
            timeout: 30,
            sport_id: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub leagues: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            season: None,
            leagues: "103,104".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub no_headers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            no_headers: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn resolve_config_path(override_path: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        let expanded = expand_path(path)?;
        if expanded.is_dir() {
            return Ok(expanded.join("config.toml"));
        }
        return Ok(expanded);
    }

    Ok(default_config_dir()?.join("config.toml"))
}

fn load_config(config_path: &Path, global: &GlobalOpts) -> Result<AppConfig> {
    // Create default config if it doesn't exist
    if !config_path.exists() {
        write_default_config(config_path)?;
    }

    let config = Config::builder()
        .set_default("api.stats_url", DEFAULT_STATS_URL)?
        .set_default("api.scores_url", DEFAULT_SCORES_URL)?
        .set_default("api.timeout", 30_i64)?
        .set_default("api.sport_id", 1_i64)?
        .set_default("defaults.leagues", "103,104")?
        .set_default("output.format", "auto")?
        .set_default("output.no_headers", false)?
        .set_default("logging.level", "warn")?
        .add_source(
            File::from(config_path)
                .format(FileFormat::Toml)
                .required(false),
        )
        // MLBQ__SECTION__KEY overrides any config value
        .add_source(
            Environment::with_prefix("MLBQ")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut app_config: AppConfig = config.try_deserialize()?;

    // Apply CLI overrides
    if global.no_headers {
        app_config.output.no_headers = true;
    }

    Ok(app_config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }

    let config = AppConfig::default();
    let toml = toml::to_string_pretty(&config).context("serializing default config")?;

    let content = format!(
        "# mlbq configuration\n\
        # File: {}\n\
        #\n\
        # Environment variables:\n\
        #   MLB_STATS_URL  - MLB Stats API base URL\n\
        #   MLB_SCORES_URL - ESPN scoreboard base URL\n\
        #   MLBQ__*        - Override any config value (e.g., MLBQ__LOGGING__LEVEL=debug)\n\
        #\n\
        # [defaults] season = \"2024\" pins the season; otherwise the current year is used.\n\
        \n\
        {toml}",
        path.display()
    );

    fs::write(path, content).with_context(|| format!("writing config to {}", path.display()))
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    if let Some(text) = path.to_str() {
        let expanded = shellexpand::full(text).context("expanding path")?;
        Ok(PathBuf::from(expanded.to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn default_config_dir() -> Result<PathBuf> {
    // Check XDG_CONFIG_HOME first
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(APP_NAME));
    }

    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine configuration directory"))
}

/// Context backed by a config file in `dir`, with extra global flags
#[cfg(test)]
pub(crate) fn test_context(dir: &Path, args: &[&str]) -> RuntimeContext {
    use clap::Parser;

    let config = dir.join("config.toml");
    let mut argv = vec!["mlbq", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    argv.push("teams");
    let cli = crate::cli::Cli::parse_from(argv);
    RuntimeContext::new(&cli.global).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.api.sport_id, 1);
        assert_eq!(config.api.stats_url, DEFAULT_STATS_URL);
        assert_eq!(config.defaults.leagues, "103,104");
        assert_eq!(config.output.format, "auto");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_default_config_written_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), &[]);
        assert!(dir.path().join("config.toml").exists());
        assert_eq!(ctx.timeout(), 30);
        assert_eq!(ctx.stats_url(), DEFAULT_STATS_URL);
    }

    #[test]
    fn test_file_values_and_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[api]\ntimeout = 5\n\n[defaults]\nseason = \"2023\"\n\n[output]\nformat = \"yaml\"\n",
        )
        .unwrap();

        let ctx = test_context(dir.path(), &[]);
        assert_eq!(ctx.timeout(), 5);
        assert_eq!(ctx.season(None), "2023");
        assert_eq!(ctx.season(Some("2021")), "2021");
        assert_eq!(ctx.output_format(), OutputFormat::Yaml);

        let ctx = test_context(dir.path(), &["--timeout", "9", "--json"]);
        assert_eq!(ctx.timeout(), 9);
        assert_eq!(ctx.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_season_defaults_to_current_year() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path(), &[]);
        assert_eq!(ctx.season(None), Local::now().year().to_string());
        assert_eq!(ctx.leagues(None), "103,104");
        assert_eq!(ctx.leagues(Some("103")), "103");
    }
}
