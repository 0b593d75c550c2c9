//! Word-addressed processor and cache simulator library.
//!
//! This crate runs eight-opcode machine-code programs on a processor that
//! reaches memory only through a configurable cache. It provides the following:
//! 1. **Core:** Processor state and the fetch/decode/execute step.
//! 2. **Cache:** Set-associative, write-back, write-allocate cache with true LRU.
//! 3. **ISA:** Field extraction, decoding, encoding and disassembly.
//! 4. **Trace:** Every block and word transfer, reported in the order it happens.
//! 5. **Simulation:** Program loading, configuration, run control and statistics.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::config::CacheConfig;
//! use cachesim_core::sim::{ProgramImage, Simulator};
//! use cachesim_core::trace::TraceLog;
//!
//! // lw 1 0 2; halt; 42
//! let image = ProgramImage::new(vec![8912898, 25165824, 42]).unwrap();
//! let config = CacheConfig::new(4, 2, 1).unwrap();
//! let mut sim = Simulator::new(config, &image, TraceLog::new()).unwrap();
//!
//! let summary = sim.run().unwrap();
//! assert!(summary.halted);
//! assert_eq!(summary.instructions, 2);
//! assert_eq!(sim.cpu().regs.read(1), 42);
//! ```

/// Common types and constants (addresses, access kinds, errors).
pub mod common;
/// Simulator configuration (cache geometry and run options).
pub mod config;
/// Processor core (register file, execution, cache).
pub mod core;
/// Instruction set (fields, decode, encode, disassembly).
pub mod isa;
/// Flat main memory behind the cache.
pub mod memory;
/// Program loader and simulator session.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Transfer events and trace sinks.
pub mod trace;

/// Root configuration type; use `Config::default()` or parse it from JSON.
pub use crate::config::{CacheConfig, Config};
/// Processor type; holds pc, registers and stats.
pub use crate::core::Cpu;
/// Cache type; owns main memory and a trace sink.
pub use crate::core::units::cache::Cache;
/// Simulator session; owns a processor and its cache.
pub use crate::sim::Simulator;
