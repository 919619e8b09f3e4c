// qualis-core/src/infrastructure/config/project.rs

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::domain::project::QualisConfig;
use crate::domain::quality::QualityThresholds;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["qualis.yaml", "qualis_conf.yaml"];

const ENV_AUDIT_PATH: &str = "QUALIS_AUDIT_PATH";
const ENV_FACTOR_TIMEOUT_MS: &str = "QUALIS_FACTOR_TIMEOUT_MS";

/// Loads the QA configuration of a project directory.
///
/// Layers, last one wins: built-in defaults, the main YAML file (if any), the
/// `thresholds.yml` fragment of the first config path, then environment
/// variables. The result is validated before it is returned.
#[instrument(skip(project_dir))]
pub fn load_config(project_dir: &Path) -> Result<QualisConfig, InfrastructureError> {
    load_config_with(project_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(project_dir: &Path, lookup: F) -> Result<QualisConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading QA configuration");
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read QA config at {:?}", config_path))?;
            serde_yaml::from_str(&content)?
        }
        None => {
            debug!(dir = ?project_dir, "No QA configuration file, using defaults");
            QualisConfig::default()
        }
    };

    if let Some(config_folder) = config.config_paths.first() {
        let config_dir = project_dir.join(config_folder);
        if config_dir.exists() {
            load_satellite_configs(&mut config, &config_dir)?;
        }
    }

    apply_overrides(&mut config, lookup)?;

    config.validate()?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config fragment at {:?}", path))?;
    Ok(serde_yaml::from_str(&content)?)
}

fn load_satellite_configs(config: &mut QualisConfig, config_dir: &Path) -> Result<(), InfrastructureError> {
    let thresholds_path = config_dir.join("thresholds.yml");
    if thresholds_path.exists() {
        #[derive(Deserialize)]
        struct ThresholdsWrapper {
            quality_thresholds: QualityThresholds,
        }

        let wrapper: ThresholdsWrapper = load_fragment(&thresholds_path)?;
        config.quality_thresholds = wrapper.quality_thresholds;
        info!(path = ?thresholds_path, "Quality thresholds loaded from fragment");
    }
    Ok(())
}

/// Environment layer: `QUALIS_AUDIT_PATH` and `QUALIS_FACTOR_TIMEOUT_MS`.
pub fn apply_overrides<F>(config: &mut QualisConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_AUDIT_PATH) {
        info!(old = ?config.audit_path, new = ?val, "Overriding audit path via ENV");
        config.audit_path = val;
    }
    if let Some(val) = lookup(ENV_FACTOR_TIMEOUT_MS) {
        let timeout = val.trim().parse::<u64>().map_err(|e| {
            InfrastructureError::ConfigError(format!("{} must be an integer ({}): {:?}", ENV_FACTOR_TIMEOUT_MS, e, val))
        })?;
        info!(old = config.factor_timeout_ms, new = timeout, "Overriding factor timeout via ENV");
        config.factor_timeout_ms = timeout;
    }
    Ok(())
}
