//! Cache block (line) state.

/// One resident line: validity, dirty flag, tag, and its words.
///
/// Blocks are created invalid and clean at cache construction and are only
/// ever reinitialized by a fill, never dropped individually.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    valid: bool,
    dirty: bool,
    tag: u32,
    words: Vec<i32>,
}

impl Block {
    /// Creates an invalid, clean block of `block_size_words` zero words.
    pub fn new(block_size_words: usize) -> Self {
        Self {
            valid: false,
            dirty: false,
            tag: 0,
            words: vec![0; block_size_words],
        }
    }

    /// Whether the block holds a copy of memory.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the block differs from memory.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the resident memory block. Meaningless while invalid.
    #[inline]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Resident words.
    #[inline]
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Whether this block is a valid copy of the block with `tag`.
    #[inline]
    pub const fn matches(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }

    /// Reads the word at `offset`.
    #[inline]
    pub(crate) fn read(&self, offset: usize) -> i32 {
        self.words[offset]
    }

    /// Writes the word at `offset` and marks the block dirty.
    #[inline]
    pub(crate) fn write(&mut self, offset: usize, value: i32) {
        self.words[offset] = value;
        self.dirty = true;
    }

    /// Snapshot needed to write this block back, if it is valid and dirty.
    ///
    /// Returns the tag and the words. Must be taken before the block is
    /// refilled.
    pub(crate) fn write_back_contents(&self) -> Option<(u32, &[i32])> {
        (self.valid && self.dirty).then_some((self.tag, self.words.as_slice()))
    }

    /// Installs a fresh copy of memory: valid, clean, tagged.
    pub(crate) fn fill(&mut self, tag: u32, words: &[i32]) {
        self.words.copy_from_slice(words);
        self.tag = tag;
        self.valid = true;
        self.dirty = false;
    }

    /// Marks the block clean after its contents reached memory.
    pub(crate) fn clean(&mut self) {
        self.dirty = false;
    }
}
