// ============================================================================
// src/cmd/mod.rs – command subsystem root
// ============================================================================
pub mod base; // core shell execution utilities (Cmd)
pub mod update; // rce-update <mode>

// Re-export common types for convenience:
pub use base::Cmd;
