//! Common types shared by every part of the simulator.
//!
//! This module holds the small vocabulary the rest of the crate is written in:
//! 1. **Addresses:** A strong type for word addresses into main memory.
//! 2. **Constants:** Memory size, register count, and geometry limits.
//! 3. **Access kinds:** Fetch, load, and store classification for cache requests.
//! 4. **Errors:** Configuration, program-loading, and execution failures.

/// Word address type.
pub mod addr;

/// Machine-wide constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration, loading, and execution.
pub mod error;

pub use addr::WordAddr;
pub use constants::{MAX_BLOCK_WORDS, NUM_MEMORY, NUM_REGS};
pub use data::AccessType;
pub use error::{ConfigError, ExecError, LoadError, SimError};
