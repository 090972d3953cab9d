// crates/sortscope-cli/src/config.rs

//! TOML profile for the CLI.
//!
//! Resolution order: built-in defaults, then the profile file (`--config`,
//! else `$SORTSCOPE_CONFIG`, else `./sortscope.toml` when present), then
//! explicit command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use sortscope_trace::generator::RandomSpec;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a profile file.
pub const CONFIG_ENV: &str = "SORTSCOPE_CONFIG";
/// Profile picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "sortscope.toml";

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Random input parameters.
    pub random: RandomSpec,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Wrap traces in a `TraceFile` envelope by default.
    pub envelope: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { envelope: true }
    }
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("parse config toml")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("in {}", path.display()))
    }

    /// Load the profile named by `explicit` or the environment, falling back
    /// to defaults when no file is configured.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match locate(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_owned());
    }
    if let Some(p) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(p));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_is_default() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.random.len, 25);
        assert_eq!((cfg.random.min, cfg.random.max), (1, 1000));
        assert!(cfg.output.envelope);
    }

    #[test]
    fn partial_profile_keeps_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [random]
            len = 10
            seed = 7

            [output]
            envelope = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.random.len, 10);
        assert_eq!(cfg.random.seed, 7);
        assert_eq!(cfg.random.max, 1000);
        assert!(!cfg.output.envelope);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("[random]\nsize = 3\n").is_err());
        assert!(Config::from_toml_str("[render]\nfps = 2\n").is_err());
    }

    #[test]
    fn explicit_path_wins() {
        let mut p = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("sortscope_cli_cfg_{nanos}.toml"));
        fs::write(&p, "[random]\nmin = 5\nmax = 6\n").unwrap();
        let cfg = Config::load(Some(&p)).unwrap();
        assert_eq!((cfg.random.min, cfg.random.max), (5, 6));
        let _ = fs::remove_file(p);
    }
}
