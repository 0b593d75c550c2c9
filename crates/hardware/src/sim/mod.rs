//! Simulation session and program loading.
//!
//! Provides the loader that turns a machine-code file into a program image,
//! and the [`Simulator`] that runs that image on a processor and cache.

/// Program image parsing and loading.
pub mod loader;

/// Simulator session: processor, cache and reports.
pub mod simulator;

pub use loader::{ProgramImage, load_program, parse_program};
pub use simulator::{RunSummary, Simulator, StateDump};
