//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation run. It provides:
//! 1. **Defaults:** Baseline cache geometry and run options.
//! 2. **Structures:** `Config` with a `general` and a `cache` section.
//! 3. **Validation:** Geometry checks shared by the address decoder and the CLI.
//!
//! Configuration is supplied as JSON (every field optional), built directly in
//! code, or assembled by the CLI from positional arguments and prompts.

use serde::Deserialize;

use crate::common::constants::{MAX_BLOCK_WORDS, NUM_MEMORY};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default block size in words.
    pub const BLOCK_SIZE_WORDS: usize = 4;

    /// Default number of sets.
    pub const NUM_SETS: usize = 2;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{ "cache": { "block_size_words": 8, "num_sets": 4, "associativity": 2 } }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.block_size_words, 8);
/// assert!(config.general.trace_transfers);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Run options (tracing, state dump, instruction limit).
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// The cache section is not validated here: command-line values may still
    /// override it. Call [`CacheConfig::validate`] on the merged geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// General run options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit one line per cache transfer.
    #[serde(default = "GeneralConfig::default_trace_transfers")]
    pub trace_transfers: bool,
    /// Print the final machine state after halting.
    #[serde(default)]
    pub print_state: bool,
    /// Stop after this many instructions even if the program has not halted.
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

impl GeneralConfig {
    const fn default_trace_transfers() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_transfers: Self::default_trace_transfers(),
            print_state: false,
            max_instructions: None,
        }
    }
}

/// Geometry of the single cache level.
///
/// `block_size_words` and `num_sets` must be exact powers of two so that an
/// address splits cleanly into tag, set-index and block-offset bits, and the
/// whole cache must fit in main memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Words per block (1-256, power of two).
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size_words: usize,
    /// Number of sets (1 or greater, power of two).
    #[serde(default = "CacheConfig::default_num_sets")]
    pub num_sets: usize,
    /// Blocks per set (1 or greater).
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,
}

impl CacheConfig {
    const fn default_block_size() -> usize {
        defaults::BLOCK_SIZE_WORDS
    }

    const fn default_num_sets() -> usize {
        defaults::NUM_SETS
    }

    const fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first geometry violation found by [`CacheConfig::validate`].
    pub fn new(
        block_size_words: usize,
        num_sets: usize,
        associativity: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            block_size_words,
            num_sets,
            associativity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the block size on its own.
    ///
    /// # Errors
    ///
    /// Fails when the size is outside `1..=256` or not a power of two.
    pub const fn check_block_size(size: usize) -> Result<(), ConfigError> {
        if size == 0 || size > MAX_BLOCK_WORDS {
            return Err(ConfigError::BlockSizeOutOfRange {
                size,
                max: MAX_BLOCK_WORDS,
            });
        }
        if !size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(size));
        }
        Ok(())
    }

    /// Checks the set count on its own.
    ///
    /// # Errors
    ///
    /// Fails when the count is zero or not a power of two.
    pub const fn check_num_sets(sets: usize) -> Result<(), ConfigError> {
        if sets.is_power_of_two() {
            Ok(())
        } else {
            Err(ConfigError::NumSetsNotPowerOfTwo(sets))
        }
    }

    /// Checks the associativity on its own.
    ///
    /// # Errors
    ///
    /// Fails when the associativity is zero.
    pub const fn check_associativity(ways: usize) -> Result<(), ConfigError> {
        if ways == 0 {
            Err(ConfigError::ZeroAssociativity)
        } else {
            Ok(())
        }
    }

    /// Validates the whole geometry.
    ///
    /// # Errors
    ///
    /// Returns the first violation: block size, then set count, then
    /// associativity, then total capacity against main memory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_block_size(self.block_size_words)?;
        Self::check_num_sets(self.num_sets)?;
        Self::check_associativity(self.associativity)?;

        let words = self.capacity_words();
        if words > NUM_MEMORY {
            return Err(ConfigError::CapacityExceedsMemory {
                words,
                max: NUM_MEMORY,
            });
        }
        Ok(())
    }

    /// Total cache capacity in words, saturating on overflow.
    pub const fn capacity_words(&self) -> usize {
        self.block_size_words
            .saturating_mul(self.num_sets)
            .saturating_mul(self.associativity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            block_size_words: defaults::BLOCK_SIZE_WORDS,
            num_sets: defaults::NUM_SETS,
            associativity: defaults::ASSOCIATIVITY,
        }
    }
}
