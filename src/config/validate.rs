// src/config/validate.rs

use std::collections::BTreeSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunlensError};
use crate::types::EnginePreference;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RunlensError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.debug, raw.runnable))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_runnables(cfg)?;
    validate_runnables(cfg)?;
    validate_debug_engine(cfg)?;
    Ok(())
}

fn ensure_has_runnables(cfg: &RawConfigFile) -> Result<()> {
    if cfg.runnable.is_empty() {
        return Err(RunlensError::ConfigError(
            "config must contain at least one [runnable.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_runnables(cfg: &RawConfigFile) -> Result<()> {
    let mut seen_labels = BTreeSet::new();

    for (name, runnable) in cfg.runnable.iter() {
        if runnable.bin.trim().is_empty() {
            return Err(RunlensError::ConfigError(format!(
                "runnable '{}' has an empty `bin`",
                name
            )));
        }
        if let Some(label) = &runnable.label {
            if label.trim().is_empty() {
                return Err(RunlensError::ConfigError(format!(
                    "runnable '{}' has an empty `label` (omit it to use the name)",
                    name
                )));
            }
        }

        // Labels show up as the primary line in the picker; two runnables
        // with the same label would be indistinguishable there.
        let label = runnable.label.as_deref().unwrap_or(name);
        if !seen_labels.insert(label) {
            return Err(RunlensError::ConfigError(format!(
                "label '{}' is used by more than one runnable",
                label
            )));
        }
    }
    Ok(())
}

fn validate_debug_engine(cfg: &RawConfigFile) -> Result<()> {
    // `auto` and the two known extension ids are accepted; anything else
    // would have no configuration schema to build.
    if !cfg.debug.engine.is_known() {
        if let EnginePreference::Explicit(id) = &cfg.debug.engine {
            return Err(RunlensError::UnknownDebugEngine(id.clone()));
        }
    }
    Ok(())
}
