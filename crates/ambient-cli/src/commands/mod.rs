//! CLI command implementations

pub mod classify;
pub mod presets;
pub mod simulate;
