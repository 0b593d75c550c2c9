//! Error definitions.
//!
//! Every failure the simulator can report is fatal at the point it is
//! detected; there is nothing to retry. The categories are:
//! 1. **Configuration:** Cache geometry that the address decoder cannot split.
//! 2. **Loading:** A program image that cannot be read or parsed.
//! 3. **Execution:** An opcode outside the instruction set, or an address
//!    outside main memory.
//!
//! Cache misses are part of normal operation and never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;

/// Invalid cache geometry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Block size is not an exact power of two.
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// Block size is zero or larger than the supported maximum.
    #[error("block size {size} is not within the parameters (1-{max})")]
    BlockSizeOutOfRange {
        /// Requested block size in words.
        size: usize,
        /// Largest accepted block size in words.
        max: usize,
    },

    /// Set count is zero or not an exact power of two.
    #[error("number of sets {0} is not a power of two")]
    NumSetsNotPowerOfTwo(usize),

    /// Associativity is zero.
    #[error("associativity must be 1 or greater")]
    ZeroAssociativity,

    /// The cache would hold more words than main memory.
    #[error("cache holds {words} words but memory only holds {max}")]
    CapacityExceedsMemory {
        /// Total cache capacity in words (saturated on overflow).
        words: usize,
        /// Main memory size in words.
        max: usize,
    },

    /// A configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Parse(String),
}

/// Failure to read a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be opened or read.
    #[error("cannot open file '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from an already-open source failed.
    #[error("failed to read program image: {0}")]
    Read(#[from] io::Error),

    /// A line does not hold a decimal machine-code word.
    #[error("line {line}: '{text}' is not a machine-code word")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending line with surrounding whitespace removed.
        text: String,
    },

    /// The image does not fit in main memory.
    #[error("program image holds {words} words but memory holds {max}")]
    TooLarge {
        /// Number of words in the image.
        words: usize,
        /// Main memory size in words.
        max: usize,
    },
}

/// Fatal condition raised while executing a program.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The fetched word does not carry one of the eight defined opcodes.
    #[error("fatal decode error: opcode {opcode} (word {word}) at pc {pc}")]
    FatalDecode {
        /// Address the word was fetched from.
        pc: i32,
        /// The fetched word.
        word: i32,
        /// Opcode field of the word.
        opcode: i32,
    },

    /// An access targeted an address outside main memory.
    #[error("{kind} address {addr} is outside main memory")]
    AddressOutOfRange {
        /// The offending address, as computed by the processor.
        addr: i64,
        /// Kind of access that was attempted.
        kind: AccessType,
    },
}

/// Any error the simulator can report.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Program image could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Execution stopped on a fatal condition.
    #[error(transparent)]
    Exec(#[from] ExecError),
}
