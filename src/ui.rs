// ============================================================================
// src/ui.rs – Console output layer (progress lines, panels, pacing)
// ============================================================================

use console::Style;
use std::thread;
use std::time::Duration;

pub const BANNER_BODY_WIDTH: usize = 56;

/// Unified console voice for the orchestrator. All operator-facing text
/// goes through here so quiet mode stays consistent.
pub struct UX {
    pub quiet: bool,
}

impl UX {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn banner(&self) {
        if self.quiet {
            return;
        }
        let frame = Style::new().color256(39).bold();
        let title = Style::new().color256(45).bold();
        let span = "═".repeat(BANNER_BODY_WIDTH);
        println!("{}", frame.apply_to(format!("╔{}╗", span)));
        println!(
            "{}",
            title.apply_to(format!(
                "║{:^width$}║",
                "RCE UPDATE ORCHESTRATOR",
                width = BANNER_BODY_WIDTH
            ))
        );
        println!("{}", frame.apply_to(format!("╚{}╝", span)));
    }

    pub fn phase(&self, msg: &str) {
        println!("{}", Style::new().cyan().bold().apply_to(format!("── {msg}")));
    }

    pub fn info(&self, msg: &str) {
        println!("{}", Style::new().white().apply_to(format!("» {msg}")));
    }

    pub fn note(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!("{}", Style::new().dim().apply_to(format!("  {msg}")));
    }

    pub fn success(&self, msg: &str) {
        println!("{}", Style::new().green().bold().apply_to(format!("✓ {msg}")));
    }

    pub fn warn(&self, msg: &str) {
        println!("{}", Style::new().yellow().bold().apply_to(format!("! {msg}")));
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{}", Style::new().red().bold().apply_to(format!("✗ {msg}")));
    }

    pub fn data_panel(&self, title: &str, rows: &[(&str, String)]) {
        if self.quiet {
            return;
        }
        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        println!("{}", Style::new().cyan().bold().apply_to(title));
        for (key, value) in rows {
            let padded = format!("{:<width$}", key, width = width);
            println!("  {}  {}", Style::new().bold().apply_to(padded), value);
        }
    }
}

/// How long the console lingers after a message, so dense output stays
/// readable during long privileged runs.
#[derive(Debug, Clone, Copy)]
pub enum Pace {
    Info,
    Prompt,
    Error,
}

pub struct Timing {
    quiet: bool,
}

impl Timing {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn pace(&self, pace: Pace) {
        if self.quiet {
            return;
        }
        let ms = match pace {
            Pace::Info => 120,
            Pace::Prompt => 250,
            Pace::Error => 400,
        };
        thread::sleep(Duration::from_millis(ms));
    }
}
