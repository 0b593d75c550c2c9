//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the
//! architectural state of the processor. It coordinates the following:
//! 1. **State Management:** Maintains the registers, program counter and run state.
//! 2. **Memory Path:** Issues every fetch, load and store through the cache.
//! 3. **Accounting:** Tracks instruction and cache statistics for the run.

/// Fetch, decode and execute of a single instruction.
pub mod execution;

use crate::core::arch::Gpr;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Run state of the processor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpuState {
    /// Fetching and executing instructions.
    #[default]
    Running,
    /// Stopped by a `halt` instruction. Terminal.
    Halted,
}

/// What a single step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction other than `halt` completed.
    Executed(Instruction),
    /// The processor is halted, either by this step or an earlier one.
    Halted,
}

/// Main CPU structure containing all processor state.
///
/// The CPU holds no memory of its own; every step is handed the cache it
/// fetches from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cpu {
    /// Program Counter, as a word address.
    pub pc: i32,
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Running or halted.
    pub state: CpuState,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a processor at pc 0 with every register zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `halt` has been executed.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Instructions executed so far, including a final `halt`.
    pub const fn instructions(&self) -> u64 {
        self.stats.instructions
    }
}
