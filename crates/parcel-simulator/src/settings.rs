//! Configuration loading.
//!
//! Layering, lowest to highest precedence:
//!
//! 1. TOML files given via `--config`, merged in order (later files
//!    override earlier fields, tables merge key-by-key);
//! 2. `SIMULATOR_ID` / `METRICS_PORT` environment variables;
//! 3. command-line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use toml::Value;

use parcel_core::SimConfig;

/// Load and validate the effective configuration.
pub fn load(paths: &[PathBuf], id_flag: Option<&str>) -> Result<SimConfig> {
    load_with(
        paths,
        id_flag,
        std::env::var("SIMULATOR_ID").ok().as_deref(),
        std::env::var("METRICS_PORT").ok().as_deref(),
    )
}

/// [`load`] with the environment passed explicitly, for tests.
pub fn load_with(
    paths:       &[PathBuf],
    id_flag:     Option<&str>,
    env_id:      Option<&str>,
    env_metrics: Option<&str>,
) -> Result<SimConfig> {
    let mut merged = Value::Table(toml::map::Map::new());
    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let value: Value = text
            .parse()
            .with_context(|| format!("parsing config file {}", path.display()))?;
        merge(&mut merged, value);
    }

    let mut config: SimConfig = merged.try_into().context("invalid configuration")?;
    apply_overrides(&mut config, id_flag, env_id, env_metrics)?;
    config.validate()?;
    Ok(config)
}

/// Recursive TOML merge: tables merge key-by-key, everything else is
/// replaced by the overlay.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base), Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

/// Environment and flag overrides, flag winning over environment.
pub fn apply_overrides(
    config:      &mut SimConfig,
    id_flag:     Option<&str>,
    env_id:      Option<&str>,
    env_metrics: Option<&str>,
) -> Result<()> {
    if let Some(id) = id_flag.or(env_id) {
        config.simulator_id = id.to_string();
    }
    if let Some(raw) = env_metrics {
        let port: u16 = raw
            .parse()
            .with_context(|| format!("METRICS_PORT `{raw}` is not a valid port"))?;
        config.metrics_port = Some(port);
    }
    Ok(())
}
