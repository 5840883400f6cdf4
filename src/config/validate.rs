// src/config/validate.rs

use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile, Settings};
use crate::engine::core::delay_from_secs;
use crate::engine::{MonitorOptions, DEFAULT_CASCADE_LIMIT};
use crate::errors::{DirmonError, Result};
use crate::exec::DEFAULT_TOKEN;
use crate::types::DeliveryMode;
use crate::watch::{SuffixPattern, DEFAULT_SUFFIX};

/// CLI default for seconds between scans.
pub const DEFAULT_DELAY_SECS: f64 = 5.0;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DirmonError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    if let Some(delay) = cfg.monitor.delay {
        delay_from_secs(delay)?;
    }
    if let Some(ref suffix) = cfg.monitor.suffix {
        SuffixPattern::new(suffix)?;
    }
    if let Some(ref token) = cfg.command.token {
        validate_token(token)?;
    }
    if let Some(limit) = cfg.monitor.cascade_limit {
        validate_cascade_limit(limit)?;
    }
    Ok(())
}

fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(DirmonError::ConfigError(
            "[command].token must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_cascade_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(DirmonError::ConfigError(
            "[monitor].cascade_limit must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// Merge CLI flags over an optional settings file over built-in defaults.
///
/// Boolean flags can only switch a setting on: `--force` wins over
/// `force = false`, but an absent flag leaves the file's value in place.
pub fn resolve_settings(args: &CliArgs, file: Option<&ConfigFile>) -> Result<Settings> {
    let default_raw = RawConfigFile::default();
    let (monitor, command) = match file {
        Some(cfg) => (cfg.monitor(), cfg.command()),
        None => (&default_raw.monitor, &default_raw.command),
    };

    let suffix = args
        .suffix
        .as_deref()
        .or(monitor.suffix.as_deref())
        .unwrap_or(DEFAULT_SUFFIX);
    let pattern = SuffixPattern::new(suffix)?;

    let delay = delay_from_secs(args.delay.or(monitor.delay).unwrap_or(DEFAULT_DELAY_SECS))?;

    let root = args
        .root
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| monitor.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let token = args
        .token
        .clone()
        .or_else(|| command.token.clone())
        .unwrap_or_else(|| DEFAULT_TOKEN.to_string());
    validate_token(&token)?;

    let cascade_limit = monitor.cascade_limit.unwrap_or(DEFAULT_CASCADE_LIMIT);
    validate_cascade_limit(cascade_limit)?;

    let options = MonitorOptions {
        delivery: DeliveryMode::from_loop_flag(args.per_file || monitor.per_file.unwrap_or(false)),
        force: args.force || monitor.force.unwrap_or(false),
        cascade: args.cascade || monitor.cascade.unwrap_or(false),
        cascade_limit,
    };

    Ok(Settings {
        pattern,
        delay,
        root,
        options,
        command: args.shell_command()?,
        token,
        verbose: args.verbose || command.verbose.unwrap_or(false),
    })
}
