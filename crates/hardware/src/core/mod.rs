//! Core processor implementation.
//!
//! This module contains the processor, its architectural state, and the cache
//! it issues every fetch, load and store through.

/// Architecture-specific components (register file).
pub mod arch;

/// CPU core implementation and instruction execution.
pub mod cpu;

/// Execution units (cache).
pub mod units;

pub use self::cpu::{Cpu, CpuState, StepOutcome};
