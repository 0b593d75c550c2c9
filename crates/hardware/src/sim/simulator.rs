//! Simulator: owns the processor and the cache side-by-side.
//!
//! The processor borrows the cache for the duration of each step, so neither
//! has to hold a reference to the other.

use std::fmt;

use tracing::{debug, info};

use super::loader::ProgramImage;
use crate::common::error::{ExecError, SimError};
use crate::config::CacheConfig;
use crate::core::units::cache::Cache;
use crate::core::{Cpu, StepOutcome};
use crate::memory::MainMemory;
use crate::stats::SimStats;
use crate::trace::TraceSink;

/// How a bounded run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed since the simulator was created, including `halt`.
    pub instructions: u64,
    /// Whether the processor halted. `false` means the limit was reached first.
    pub halted: bool,
}

/// Top-level simulator: processor state plus the cache in front of memory.
#[derive(Debug)]
pub struct Simulator<S> {
    cpu: Cpu,
    cache: Cache<S>,
    word_count: usize,
}

impl<S: TraceSink> Simulator<S> {
    /// Loads `image` into a fresh memory and builds the cache in front of it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for invalid geometry and
    /// [`SimError::Load`] if the image does not fit.
    pub fn new(config: CacheConfig, image: &ProgramImage, sink: S) -> Result<Self, SimError> {
        let memory = MainMemory::with_image(image.words())?;
        let cache = Cache::new(config, memory, sink)?;
        info!(
            words = image.len(),
            block_size_words = config.block_size_words,
            num_sets = config.num_sets,
            associativity = config.associativity,
            "simulator ready"
        );
        Ok(Self {
            cpu: Cpu::new(),
            cache,
            word_count: image.len(),
        })
    }

    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// Propagates any [`ExecError`] from the processor.
    pub fn step(&mut self) -> Result<StepOutcome, ExecError> {
        self.cpu.step(&mut self.cache)
    }

    /// Runs until the processor halts.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ExecError`].
    pub fn run(&mut self) -> Result<RunSummary, ExecError> {
        self.run_for(u64::MAX)
    }

    /// Runs until the processor halts or `limit` more instructions have executed.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ExecError`].
    pub fn run_for(&mut self, limit: u64) -> Result<RunSummary, ExecError> {
        let mut executed = 0;
        while executed < limit && !self.cpu.is_halted() {
            let _ = self.step()?;
            executed += 1;
        }
        let summary = RunSummary {
            instructions: self.cpu.instructions(),
            halted: self.cpu.is_halted(),
        };
        if summary.halted {
            info!(instructions = summary.instructions, "machine halted");
        } else {
            debug!(?summary, "run stopped at instruction limit");
        }
        Ok(summary)
    }

    /// Whether the processor has halted.
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Processor state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The cache, with its memory and trace sink.
    pub const fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    /// The cache, mutably.
    pub const fn cache_mut(&mut self) -> &mut Cache<S> {
        &mut self.cache
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Number of words in the loaded image.
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Writes every dirty block back so memory reflects all stores.
    ///
    /// # Errors
    ///
    /// Propagates [`ExecError`] from the cache.
    pub fn flush(&mut self) -> Result<usize, ExecError> {
        self.cache.flush()
    }

    /// The `@@@ state:` report of pc, image words and registers.
    ///
    /// Memory is read directly, so stores still held in dirty blocks are not
    /// visible unless the cache has been flushed.
    pub fn state_dump(&self) -> StateDump<'_> {
        StateDump {
            pc: self.cpu.pc,
            memory: self
                .cache
                .memory()
                .words()
                .get(..self.word_count)
                .unwrap_or_default(),
            regs: self.cpu.regs.as_slice(),
        }
    }

    /// Consumes the simulator, returning the processor, memory and trace sink.
    pub fn into_parts(self) -> (Cpu, MainMemory, S) {
        let (memory, sink) = self.cache.into_parts();
        (self.cpu, memory, sink)
    }
}

/// Machine state snapshot, printed in the `@@@` format.
#[derive(Clone, Copy, Debug)]
pub struct StateDump<'a> {
    pc: i32,
    memory: &'a [i32],
    regs: &'a [i32],
}

impl fmt::Display for StateDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n@@@\nstate:\n")?;
        writeln!(f, "\tpc {}", self.pc)?;
        writeln!(f, "\tmemory:")?;
        for (i, word) in self.memory.iter().enumerate() {
            writeln!(f, "\t\tmem[{i}]={word}")?;
        }
        writeln!(f, "\tregisters:")?;
        for (i, reg) in self.regs.iter().enumerate() {
            writeln!(f, "\t\treg[{i}]={reg}")?;
        }
        writeln!(f, "end state")
    }
}
