// ============================================================================
// src/util/mod.rs – shared utilities
// ============================================================================
pub mod audit;
