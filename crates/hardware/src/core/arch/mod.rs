//! Architectural state.
//!
//! The only architectural storage besides the program counter is the
//! general-purpose register file.

/// General-Purpose Register file implementation.
pub mod gpr;

pub use self::gpr::Gpr;
