pub mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{default_education_hierarchy, Config, Thresholds};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::scoring::{repair_config, Component};

/// Get the config directory path (~/.config/talent-match/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("talent-match")
}

/// Get the default config file path (~/.config/talent-match/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Configuration plus any problems met while loading it
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    pub problems: Vec<String>,
}

/// Read and parse a YAML config file, rejecting unknown keys.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML cannot be parsed.
pub fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

fn take<T: DeserializeOwned>(path: &str, value: Value, slot: &mut T, problems: &mut Vec<String>) {
    match serde_json::from_value(value) {
        Ok(v) => *slot = v,
        Err(e) => problems.push(format!("{}: {}; using default", path, e)),
    }
}

fn section(path: &str, value: Value, problems: &mut Vec<String>) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => {
            problems.push(format!("{}: must be a mapping; using defaults", path));
            Map::new()
        }
    }
}

/// Parse config YAML key by key.
///
/// A key that is unknown or has the wrong type is reported and skipped;
/// every other key still applies. Only YAML that cannot be read at all,
/// or whose top level is not a mapping, is an error.
pub fn parse_config_lenient(content: &str) -> Result<(Config, Vec<String>)> {
    let blank = content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok((Config::default(), vec![]));
    }

    let value: Value =
        serde_saphyr::from_str(content).context("Failed to parse config: invalid YAML")?;

    let mut config = Config::default();
    let mut problems = Vec::new();

    let top = match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => anyhow::bail!("Failed to parse config: top level must be a mapping"),
    };

    for (key, value) in top {
        match key.as_str() {
            "weights" => {
                for (name, weight) in section("weights", value, &mut problems) {
                    let path = format!("weights.{}", name);
                    match Component::from_key(&name) {
                        Some(component) => {
                            let mut slot = config.weights.get(component);
                            take(&path, weight, &mut slot, &mut problems);
                            config.weights.set(component, slot);
                        }
                        None => problems.push(format!("{}: unknown key, ignored", path)),
                    }
                }
            }
            "education_hierarchy" => {
                take(&key, value, &mut config.education_hierarchy, &mut problems)
            }
            "thresholds" => {
                for (name, score) in section("thresholds", value, &mut problems) {
                    let path = format!("thresholds.{}", name);
                    if name == "minimum_match_score" {
                        take(&path, score, &mut config.thresholds.minimum_match_score, &mut problems);
                    } else {
                        problems.push(format!("{}: unknown key, ignored", path));
                    }
                }
            }
            "debug_mode" => take(&key, value, &mut config.debug_mode, &mut problems),
            _ => problems.push(format!("{}: unknown key, ignored", key)),
        }
    }

    Ok((config, problems))
}

/// Load configuration, falling back to defaults where needed.
///
/// A config file is never fatal. A missing, unreadable or unparseable file
/// means the full defaults. Otherwise each bad key or value falls back to
/// its own default and the rest of the file still applies. Every problem
/// is logged and recorded in `problems`.
pub fn load_config(path: Option<PathBuf>) -> LoadedConfig {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        info!(
            "Config file {} not found. Using default configuration.",
            config_path.display()
        );
        return LoadedConfig {
            config: Config::default(),
            source: ConfigSource::Defaults,
            problems: vec![],
        };
    }

    let parsed = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))
        .and_then(|content| {
            parse_config_lenient(&content).with_context(|| config_path.display().to_string())
        });

    let (mut config, mut problems) = match parsed {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Error loading configuration: {:#}", e);
            return LoadedConfig {
                config: Config::default(),
                source: ConfigSource::Defaults,
                problems: vec![format!("{:#}", e)],
            };
        }
    };

    problems.extend(repair_config(&mut config));
    for problem in &problems {
        warn!("Invalid configuration: {}", problem);
    }

    info!("Configuration loaded from {}", config_path.display());
    LoadedConfig {
        config,
        source: ConfigSource::File(config_path),
        problems,
    }
}
