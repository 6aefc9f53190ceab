// ============================================================================
// src/plan.rs – Mode selection and the typed command-sequence table
// ============================================================================

use crate::config::Config;
use crate::error::UpdateError;
use std::fmt;
use std::str::FromStr;

/// Host package refresh, run as-is on the host and verbatim inside the
/// container rootfs. Kept as a single compound command so the helper can
/// replay it unchanged.
pub const HOST_PACKAGE_REFRESH: &str = "apt-get update && apt-get -y upgrade";

/// Which update sequence to run. Parsed once from the positional CLI
/// argument, consumed once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Host packages, host engine, then both piped into the rootfs.
    All,
    /// Engine reinstall on the host and inside the rootfs.
    Rce,
    /// Combined update piped into the rootfs only.
    Rootfs,
    /// Reserved for the package-delivery integration; currently a no-op.
    Packages,
}

impl FromStr for Mode {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Mode::All),
            "rce" => Ok(Mode::Rce),
            "rootfs" => Ok(Mode::Rootfs),
            "packages" => Ok(Mode::Packages),
            other => Err(UpdateError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::All => "all",
            Mode::Rce => "rce",
            Mode::Rootfs => "rootfs",
            Mode::Packages => "packages",
        };
        f.write_str(s)
    }
}

/// Where a step executes: directly on the host shell, or replayed inside
/// the managed container rootfs by the helper (which takes the script on
/// stdin and runs it with elevated privileges).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Host,
    Rootfs,
}

/// One entry of the per-mode sequence table. Structured descriptor rather
/// than a concatenated shell line: the executor decides how `script`
/// reaches the target, so nothing user-controlled is ever spliced into a
/// command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    pub label: String,
    pub target: Target,
    pub script: String,
}

impl CommandStep {
    fn host(label: &str, script: String) -> Self {
        Self {
            label: label.to_string(),
            target: Target::Host,
            script,
        }
    }

    fn rootfs(label: &str, script: String) -> Self {
        Self {
            label: label.to_string(),
            target: Target::Rootfs,
            script,
        }
    }
}

/// Fetch-and-reinstall of the engine: drop any stale clone, clone the
/// pinned repository fresh, then hand over to its install script with
/// elevated privileges. Idempotent by construction, so a failed run can
/// simply be repeated.
pub fn engine_reinstall(cfg: &Config) -> String {
    format!(
        "rm -rf {dir} && git clone {url} {dir} && cd {dir} && sudo bash {script}",
        dir = cfg.engine.clone_dir,
        url = cfg.engine.repo_url,
        script = cfg.engine.install_script,
    )
}

/// The static Mode → ordered-sequence table. Everything here is fixed at
/// process start; nothing is appended or reordered at runtime.
pub fn plan_for(mode: Mode, cfg: &Config) -> Vec<CommandStep> {
    let reinstall = engine_reinstall(cfg);
    let combined = format!("{} && {}", HOST_PACKAGE_REFRESH, reinstall);

    match mode {
        Mode::All => vec![
            CommandStep::host("Refreshing host packages", HOST_PACKAGE_REFRESH.to_string()),
            CommandStep::host("Reinstalling engine on host", reinstall),
            CommandStep::rootfs("Updating container rootfs", combined),
        ],
        Mode::Rootfs => vec![CommandStep::rootfs("Updating container rootfs", combined)],
        Mode::Rce => vec![
            CommandStep::host("Reinstalling engine on host", reinstall.clone()),
            CommandStep::rootfs("Reinstalling engine inside container rootfs", reinstall),
        ],
        Mode::Packages => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn mode_parses_only_the_enumerated_set() {
        assert_eq!("all".parse::<Mode>().unwrap(), Mode::All);
        assert_eq!("rce".parse::<Mode>().unwrap(), Mode::Rce);
        assert_eq!("rootfs".parse::<Mode>().unwrap(), Mode::Rootfs);
        assert_eq!("packages".parse::<Mode>().unwrap(), Mode::Packages);

        for bad in ["ALL", "", "everything", "rootfs "] {
            let err = bad.parse::<Mode>().unwrap_err();
            assert!(err.to_string().starts_with("Invalid mode"), "{}", err);
        }
    }

    #[test]
    fn packages_plan_is_empty() {
        assert!(plan_for(Mode::Packages, &cfg()).is_empty());
    }

    #[test]
    fn rootfs_plan_is_the_single_piped_combined_update() {
        let plan = plan_for(Mode::Rootfs, &cfg());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].target, Target::Rootfs);
        assert_eq!(
            plan[0].script,
            format!("{} && {}", HOST_PACKAGE_REFRESH, engine_reinstall(&cfg()))
        );
    }

    #[test]
    fn rce_plan_is_host_engine_then_rootfs_engine() {
        let plan = plan_for(Mode::Rce, &cfg());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].target, Target::Host);
        assert_eq!(plan[1].target, Target::Rootfs);
        assert_eq!(plan[0].script, engine_reinstall(&cfg()));
        assert_eq!(plan[1].script, engine_reinstall(&cfg()));
    }

    #[test]
    fn all_plan_is_three_steps_in_fixed_order() {
        let plan = plan_for(Mode::All, &cfg());
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].target, Target::Host);
        assert_eq!(plan[0].script, HOST_PACKAGE_REFRESH);
        assert_eq!(plan[1].target, Target::Host);
        assert_eq!(plan[1].script, engine_reinstall(&cfg()));
        assert_eq!(plan[2].target, Target::Rootfs);
        assert!(plan[2].script.starts_with(HOST_PACKAGE_REFRESH));
        assert!(plan[2].script.ends_with(&engine_reinstall(&cfg())));
    }

    #[test]
    fn reinstall_script_reflects_config_overrides() {
        let mut cfg = cfg();
        cfg.engine.clone_dir = "/var/tmp/engine".to_string();
        cfg.engine.repo_url = "https://example.invalid/engine.git".to_string();
        let script = engine_reinstall(&cfg);
        assert!(script.contains("rm -rf /var/tmp/engine"));
        assert!(script.contains("git clone https://example.invalid/engine.git /var/tmp/engine"));
    }
}
