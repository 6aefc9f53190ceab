// ============================================================================
// src/cmd/update.rs – Sequenced host / rootfs update workflow
// ============================================================================

use crate::cmd::base::find_binary;
use crate::cmd::Cmd;
use crate::config::Config;
use crate::error::UpdateError;
use crate::plan::{plan_for, CommandStep, Mode, Target};
use crate::ui::{Pace, Timing, UX};
use crate::util::audit::audit_log;
use anyhow::{anyhow, Result};

/// Usual install locations for the container helper that replays a shell
/// script inside the managed rootfs.
pub const ROOTFS_HELPER_CANDIDATES: &[&str] =
    &["/usr/local/bin/rce-rootfs", "/usr/bin/rce-rootfs"];

/// Execution seam between the fixed sequence table and the processes it
/// spawns. Production goes through the allowlisted runner; tests record
/// invocations instead.
pub trait Execute {
    fn execute(&mut self, step: &CommandStep) -> Result<i32>;
}

/// Host steps run under `bash -lc`; rootfs steps are handed to the helper
/// on stdin, under sudo, per the helper's contract.
pub struct ShellExecutor {
    bash: Cmd,
    sudo: Cmd,
    helper: String,
}

impl ShellExecutor {
    pub fn new(cfg: &Config) -> Result<Self> {
        let bash_path = find_binary(&["/bin/bash", "/usr/bin/bash"])
            .ok_or_else(|| anyhow!("bash not found in /bin or /usr/bin"))?;
        let sudo_path = find_binary(&["/usr/bin/sudo", "/bin/sudo"])
            .ok_or_else(|| anyhow!("sudo not found in /usr/bin or /bin"))?;
        let helper = match &cfg.rootfs.helper_path {
            Some(p) => p.clone(),
            None => find_binary(ROOTFS_HELPER_CANDIDATES).ok_or_else(|| {
                anyhow!(
                    "rootfs helper not found. Checked: {:?}",
                    ROOTFS_HELPER_CANDIDATES
                )
            })?,
        };
        Ok(Self {
            bash: Cmd::new_allowlisted(bash_path)?,
            sudo: Cmd::new_allowlisted(sudo_path)?,
            helper,
        })
    }
}

impl Execute for ShellExecutor {
    fn execute(&mut self, step: &CommandStep) -> Result<i32> {
        match step.target {
            Target::Host => self.bash.run(&["-lc", &step.script], None),
            Target::Rootfs => {
                let mut payload = step.script.clone();
                payload.push('\n');
                self.sudo.run(&[&self.helper], Some(payload.as_bytes()))
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Public entrypoints
// ----------------------------------------------------------------------------

pub fn run_update(ui: &UX, timing: &Timing, cfg: &Config, mode: Mode) -> Result<()> {
    let plan = plan_for(mode, cfg);

    if plan.is_empty() {
        // `packages` is reserved for the delivery integration.
        ui.note("Package delivery is not wired up yet; nothing to do.");
        audit_log("UPDATE_SKIP", &format!("mode {} has no steps", mode));
        return Ok(());
    }

    ui.info(&format!("Mode '{}' selected: {} step(s).", mode, plan.len()));
    timing.pace(Pace::Prompt);

    let mut executor = ShellExecutor::new(cfg)?;
    run_plan(ui, timing, &plan, &mut executor)?;

    ui.data_panel(
        "Update Summary",
        &[
            ("Mode", mode.to_string()),
            ("Steps completed", plan.len().to_string()),
        ],
    );
    ui.success("Update complete.");
    audit_log(
        "UPDATE_OK",
        &format!("mode {}: {} step(s) completed", mode, plan.len()),
    );
    Ok(())
}

/// Print the resolved sequence without touching the system.
pub fn print_plan(ui: &UX, cfg: &Config, mode: Mode) {
    let plan = plan_for(mode, cfg);
    if plan.is_empty() {
        ui.info(&format!("Mode '{}' runs no commands.", mode));
        return;
    }
    ui.phase(&format!("Dry run // mode '{}'", mode));
    for (idx, step) in plan.iter().enumerate() {
        let target = match step.target {
            Target::Host => "host",
            Target::Rootfs => "rootfs",
        };
        ui.info(&format!(
            "{}/{} [{}] {}",
            idx + 1,
            plan.len(),
            target,
            step.label
        ));
        ui.note(&step.script);
    }
}

/// Execute the steps strictly in order. The first non-zero exit aborts the
/// remainder and surfaces as `CommandFailed`; external tools are opaque, so
/// there is no retry and no compensation.
pub fn run_plan(
    ui: &UX,
    timing: &Timing,
    plan: &[CommandStep],
    executor: &mut dyn Execute,
) -> Result<()> {
    let total = plan.len();
    for (idx, step) in plan.iter().enumerate() {
        ui.phase(&format!("Step {}/{} // {}", idx + 1, total, step.label));
        timing.pace(Pace::Info);

        let status = executor.execute(step)?;
        if status != 0 {
            ui.error(&format!(
                "'{}' exited with status {}; aborting remaining steps.",
                step.label, status
            ));
            timing.pace(Pace::Error);
            audit_log(
                "UPDATE_FAIL",
                &format!("{} exited with status {}", step.label, status),
            );
            return Err(UpdateError::CommandFailed {
                step: step.label.clone(),
                status,
            }
            .into());
        }
        audit_log("UPDATE_STEP_OK", &step.label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingExecutor {
        calls: Vec<CommandStep>,
        // (index, status) of the call scripted to fail
        fail_at: Option<(usize, i32)>,
    }

    impl RecordingExecutor {
        fn new(fail_at: Option<(usize, i32)>) -> Self {
            Self {
                calls: Vec::new(),
                fail_at,
            }
        }
    }

    impl Execute for RecordingExecutor {
        fn execute(&mut self, step: &CommandStep) -> Result<i32> {
            let idx = self.calls.len();
            self.calls.push(step.clone());
            match self.fail_at {
                Some((fail_idx, status)) if fail_idx == idx => Ok(status),
                _ => Ok(0),
            }
        }
    }

    fn quiet() -> (UX, Timing) {
        (UX::new(true), Timing::new(true))
    }

    #[test]
    fn all_mode_runs_three_steps_in_order() {
        let (ui, timing) = quiet();
        let cfg = Config::default();
        let plan = plan_for(Mode::All, &cfg);
        let mut exec = RecordingExecutor::new(None);

        run_plan(&ui, &timing, &plan, &mut exec).unwrap();
        assert_eq!(exec.calls.len(), 3);
        assert_eq!(exec.calls, plan);
    }

    #[test]
    fn rootfs_mode_runs_exactly_one_command() {
        let (ui, timing) = quiet();
        let cfg = Config::default();
        let plan = plan_for(Mode::Rootfs, &cfg);
        let mut exec = RecordingExecutor::new(None);

        run_plan(&ui, &timing, &plan, &mut exec).unwrap();
        assert_eq!(exec.calls.len(), 1);
        assert_eq!(exec.calls[0].target, Target::Rootfs);
    }

    #[test]
    fn first_failure_aborts_remaining_steps() {
        let (ui, timing) = quiet();
        let cfg = Config::default();
        let plan = plan_for(Mode::All, &cfg);
        let mut exec = RecordingExecutor::new(Some((0, 100)));

        let err = run_plan(&ui, &timing, &plan, &mut exec).unwrap_err();
        assert_eq!(exec.calls.len(), 1, "no step may run after a failure");

        let update_err = err.downcast_ref::<UpdateError>().expect("typed error");
        match update_err {
            UpdateError::CommandFailed { step, status } => {
                assert_eq!(step, &plan[0].label);
                assert_eq!(*status, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mid_sequence_failure_stops_before_the_rootfs_step() {
        let (ui, timing) = quiet();
        let cfg = Config::default();
        let plan = plan_for(Mode::All, &cfg);
        let mut exec = RecordingExecutor::new(Some((1, 1)));

        assert!(run_plan(&ui, &timing, &plan, &mut exec).is_err());
        assert_eq!(exec.calls.len(), 2);
        assert_eq!(exec.calls[1].label, plan[1].label);
    }

    #[test]
    fn empty_plan_succeeds_without_executing() {
        let (ui, timing) = quiet();
        let mut exec = RecordingExecutor::new(None);
        run_plan(&ui, &timing, &[], &mut exec).unwrap();
        assert!(exec.calls.is_empty());
    }
}
