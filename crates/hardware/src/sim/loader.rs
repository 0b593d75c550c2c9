//! Program Image Loader.
//!
//! This module reads machine-code images from disk. It performs:
//! 1. **Parsing:** One signed decimal word per line. Each line is one address,
//!    so a blank line between words holds 0; trailing blank lines are dropped.
//! 2. **Validation:** Rejects malformed lines and images larger than main memory.
//! 3. **Reporting:** Errors carry the file path or the 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::common::constants::NUM_MEMORY;
use crate::common::error::LoadError;

/// A parsed program image, loaded into memory from address 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramImage {
    words: Vec<i32>,
}

impl ProgramImage {
    /// Wraps already-encoded words.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if the words do not fit in memory.
    pub fn new(words: Vec<i32>) -> Result<Self, LoadError> {
        if words.len() > NUM_MEMORY {
            return Err(LoadError::TooLarge {
                words: words.len(),
                max: NUM_MEMORY,
            });
        }
        Ok(Self { words })
    }

    /// The image words, in address order.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the image is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parses an image from any buffered reader.
///
/// Line `n` (0-based) is the word at address `n`. A blank line followed by
/// more words is stored as 0 so later words keep their addresses.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if reading fails, [`LoadError::Parse`] for a
/// line that is not a signed 32-bit decimal integer, and
/// [`LoadError::TooLarge`] if there are more words than memory holds.
pub fn parse_program<R: BufRead>(reader: R) -> Result<ProgramImage, LoadError> {
    let mut words = Vec::new();
    let mut pending_blank = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            pending_blank += 1;
            continue;
        }
        let word = text.parse::<i32>().map_err(|_| LoadError::Parse {
            line: idx + 1,
            text: text.to_string(),
        })?;
        words.resize(words.len() + pending_blank, 0);
        pending_blank = 0;
        words.push(word);
    }
    ProgramImage::new(words)
}

/// Reads and parses the image at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened, otherwise any
/// error from [`parse_program`].
pub fn load_program(path: impl AsRef<Path>) -> Result<ProgramImage, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = parse_program(BufReader::new(file))?;
    debug!(path = %path.display(), words = image.len(), "program image loaded");
    Ok(image)
}
