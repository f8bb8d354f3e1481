// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CleanrunError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CleanrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.run, raw.host))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_run_section(cfg)?;
    validate_host_section(cfg)?;
    Ok(())
}

fn validate_run_section(cfg: &RawConfigFile) -> Result<()> {
    // mode is a closed enum, so serde already rejected unknown values.

    if cfg.run.poll_interval_ms == 0 {
        return Err(CleanrunError::ConfigError(
            "[run].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if let Some(script) = &cfg.run.script {
        if script.as_os_str().is_empty() {
            return Err(CleanrunError::ConfigError(
                "[run].script must not be empty".to_string(),
            ));
        }
    }

    if let Some(dir) = &cfg.run.temp_dir {
        if dir.as_os_str().is_empty() {
            return Err(CleanrunError::ConfigError(
                "[run].temp_dir must not be empty".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_host_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.host.terminal_app.trim().is_empty() {
        return Err(CleanrunError::ConfigError(
            "[host].terminal_app must not be empty".to_string(),
        ));
    }
    if cfg.host.osascript.as_os_str().is_empty() {
        return Err(CleanrunError::ConfigError(
            "[host].osascript must not be empty".to_string(),
        ));
    }
    Ok(())
}
