//! Simulation statistics collection and reporting.
//!
//! This module tracks what a run did. It provides:
//! 1. **Instruction count:** Every executed instruction, including the final `halt`.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, noop).
//! 3. **Cache behaviour:** Hits and misses per access kind, fills, and write-backs.

use std::fmt;

use crate::common::data::AccessType;
use crate::core::units::cache::Access;
use crate::isa::Instruction;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Instructions executed, counting the `halt` that stopped the machine.
    pub instructions: u64,

    /// `add` and `nand` instructions.
    pub inst_alu: u64,
    /// `lw` instructions.
    pub inst_load: u64,
    /// `sw` instructions.
    pub inst_store: u64,
    /// `beq` instructions.
    pub inst_branch: u64,
    /// Taken `beq` instructions.
    pub branches_taken: u64,
    /// `jalr` instructions.
    pub inst_jump: u64,
    /// `noop` instructions.
    pub inst_noop: u64,

    /// Instruction fetches served from the cache.
    pub fetch_hits: u64,
    /// Instruction fetches that installed a block.
    pub fetch_misses: u64,
    /// Loads served from the cache.
    pub load_hits: u64,
    /// Loads that installed a block.
    pub load_misses: u64,
    /// Stores to a resident block.
    pub store_hits: u64,
    /// Stores that installed a block first.
    pub store_misses: u64,
    /// Dirty blocks written back to memory on eviction.
    pub writebacks: u64,
}

impl SimStats {
    /// Accounts for one cache access.
    pub fn record_access(&mut self, kind: AccessType, access: &Access) {
        let hit = access.is_hit();
        let counter = match (kind, hit) {
            (AccessType::Fetch, true) => &mut self.fetch_hits,
            (AccessType::Fetch, false) => &mut self.fetch_misses,
            (AccessType::Load, true) => &mut self.load_hits,
            (AccessType::Load, false) => &mut self.load_misses,
            (AccessType::Store, true) => &mut self.store_hits,
            (AccessType::Store, false) => &mut self.store_misses,
        };
        *counter += 1;
        if access.wrote_back {
            self.writebacks += 1;
        }
    }

    /// Accounts for one executed instruction.
    pub fn record_instruction(&mut self, inst: &Instruction) {
        self.instructions += 1;
        match inst {
            Instruction::Add { .. } | Instruction::Nand { .. } => self.inst_alu += 1,
            Instruction::Lw { .. } => self.inst_load += 1,
            Instruction::Sw { .. } => self.inst_store += 1,
            Instruction::Beq { .. } => self.inst_branch += 1,
            Instruction::Jalr { .. } => self.inst_jump += 1,
            Instruction::Noop => self.inst_noop += 1,
            Instruction::Halt => {}
        }
    }

    /// Total hits across all access kinds.
    pub const fn hits(&self) -> u64 {
        self.fetch_hits + self.load_hits + self.store_hits
    }

    /// Total misses across all access kinds. Equals the number of block fills.
    pub const fn misses(&self) -> u64 {
        self.fetch_misses + self.load_misses + self.store_misses
    }

    /// Miss rate in percent, or 0 when there were no accesses.
    pub fn miss_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            (self.misses() as f64 / total as f64) * 100.0
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_insts                {}", self.instructions)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  op.alu                 {}", self.inst_alu)?;
        writeln!(f, "  op.load                {}", self.inst_load)?;
        writeln!(f, "  op.store               {}", self.inst_store)?;
        writeln!(
            f,
            "  op.branch              {} ({} taken)",
            self.inst_branch, self.branches_taken
        )?;
        writeln!(f, "  op.jump                {}", self.inst_jump)?;
        writeln!(f, "  op.noop                {}", self.inst_noop)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CACHE")?;
        write_cache_line(f, "fetch", self.fetch_hits, self.fetch_misses)?;
        write_cache_line(f, "load", self.load_hits, self.load_misses)?;
        write_cache_line(f, "store", self.store_hits, self.store_misses)?;
        write_cache_line(f, "total", self.hits(), self.misses())?;
        writeln!(f, "  writebacks             {}", self.writebacks)?;
        writeln!(f, "==========================================================")
    }
}

/// Writes one hit/miss line of the cache section.
fn write_cache_line(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    hits: u64,
    misses: u64,
) -> fmt::Result {
    let total = hits + misses;
    let rate = if total > 0 {
        (misses as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    writeln!(
        f,
        "  {name:<6} accesses: {total:<10} | hits: {hits:<10} | miss_rate: {rate:.2}%"
    )
}
