// ============================================================================
// src/config.rs – strict config loader
// ============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location probed when the operator passes no --config.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rce-update.toml";

/// Where the engine source lives and how it is reinstalled. The command
/// shapes themselves are fixed in `plan`; only the collaborator locations
/// are overridable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineCfg {
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Scratch checkout, removed and re-cloned on every engine reinstall.
    #[serde(default = "default_clone_dir")]
    pub clone_dir: String,

    /// Install entrypoint at the root of the clone, run via sudo.
    #[serde(default = "default_install_script")]
    pub install_script: String,
}

fn default_repo_url() -> String {
    "https://github.com/IDSCETHZurich/rce.git".to_string()
}

fn default_clone_dir() -> String {
    "/tmp/rce".to_string()
}

fn default_install_script() -> String {
    "install.sh".to_string()
}

impl Default for EngineCfg {
    fn default() -> Self {
        Self {
            repo_url: default_repo_url(),
            clone_dir: default_clone_dir(),
            install_script: default_install_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootfsCfg {
    /// Explicit path to the rootfs helper; when unset the executor probes
    /// the usual install locations.
    #[serde(default)]
    pub helper_path: Option<String>,
}

impl Default for RootfsCfg {
    fn default() -> Self {
        Self { helper_path: None }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineCfg,
    #[serde(default)]
    pub rootfs: RootfsCfg,
}

impl Config {
    pub fn load<P: AsRef<Path>>(p: P) -> Result<Self> {
        let s = fs::read_to_string(&p)
            .with_context(|| format!("read config: {}", p.as_ref().display()))?;
        let cfg: Self = if p.as_ref().extension().and_then(|e| e.to_str()) == Some("toml") {
            toml::from_str(&s).context("toml parse")?
        } else {
            serde_yaml::from_str(&s).context("yaml parse")?
        };
        Ok(cfg)
    }

    /// Explicit --config must exist and parse; the default path is only a
    /// convenience and silently falls back to built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(p) => Self::load(p),
            None => {
                let p = Path::new(DEFAULT_CONFIG_PATH);
                if p.exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
