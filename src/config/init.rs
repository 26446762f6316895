use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{get_config_path, Config};

const HEADER: &str = "\
# talent-match configuration
#
# weights: fraction of the total each component contributes (should sum to 1)
# education_hierarchy: most senior level first
# thresholds.minimum_match_score: totals below this are highlighted
#
# An unknown key or invalid value is reported and replaced by its default.
";

/// Render a config as commented YAML.
pub fn render_config(config: &Config) -> Result<String> {
    let yaml = serde_saphyr::to_string(config).context("Failed to serialize config")?;
    Ok(format!("{}\n{}", HEADER, yaml))
}

/// Write the default configuration file.
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic so an interrupted run never leaves a half-written config.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        ensure_dir(parent)?;
    }

    let content = render_config(&Config::default())?;

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(content.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    info!("Wrote default configuration to {}", config_path.display());
    Ok(config_path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
    }
    Ok(())
}
