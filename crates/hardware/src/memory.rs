//! Main memory.
//!
//! A flat array of [`NUM_MEMORY`] signed 32-bit words. After the program image
//! is loaded, memory is only ever touched by the cache: whole-block reads on a
//! fill and whole-block writes on a write-back.

use crate::common::addr::WordAddr;
use crate::common::constants::NUM_MEMORY;
use crate::common::data::AccessType;
use crate::common::error::{ExecError, LoadError};

/// Backing store behind the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MainMemory {
    words: Vec<i32>,
}

impl MainMemory {
    /// Creates a zeroed memory of [`NUM_MEMORY`] words.
    pub fn new() -> Self {
        Self {
            words: vec![0; NUM_MEMORY],
        }
    }

    /// Creates a memory holding `image` from address 0.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if the image does not fit.
    pub fn with_image(image: &[i32]) -> Result<Self, LoadError> {
        let mut memory = Self::new();
        memory.load_image(image)?;
        Ok(memory)
    }

    /// Copies `image` into memory starting at address 0.
    ///
    /// This is the only direct write to memory; everything afterwards goes
    /// through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if the image does not fit.
    pub fn load_image(&mut self, image: &[i32]) -> Result<(), LoadError> {
        let dst = self
            .words
            .get_mut(..image.len())
            .ok_or(LoadError::TooLarge {
                words: image.len(),
                max: NUM_MEMORY,
            })?;
        dst.copy_from_slice(image);
        Ok(())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; memory has a fixed, non-zero size.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads one word directly, bypassing the cache.
    pub fn read(&self, addr: WordAddr) -> Option<i32> {
        self.words.get(addr.index()).copied()
    }

    /// All words.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Checks that `addr` names a word of memory.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::AddressOutOfRange`] otherwise.
    pub fn check(&self, addr: WordAddr, kind: AccessType) -> Result<(), ExecError> {
        if addr.index() < self.words.len() {
            Ok(())
        } else {
            Err(ExecError::AddressOutOfRange {
                addr: i64::from(addr.val()),
                kind,
            })
        }
    }

    /// The `len` words starting at `base`.
    pub(crate) fn block(&self, base: WordAddr, len: usize) -> Result<&[i32], ExecError> {
        let start = base.index();
        self.words
            .get(start..start.saturating_add(len))
            .ok_or(ExecError::AddressOutOfRange {
                addr: i64::from(base.val()),
                kind: AccessType::Load,
            })
    }

    /// Overwrites the words starting at `base` with `data`.
    pub(crate) fn write_block(&mut self, base: WordAddr, data: &[i32]) -> Result<(), ExecError> {
        let start = base.index();
        let dst = self
            .words
            .get_mut(start..start.saturating_add(data.len()))
            .ok_or(ExecError::AddressOutOfRange {
                addr: i64::from(base.val()),
                kind: AccessType::Store,
            })?;
        dst.copy_from_slice(data);
        Ok(())
    }
}

impl Default for MainMemory {
    fn default() -> Self {
        Self::new()
    }
}
