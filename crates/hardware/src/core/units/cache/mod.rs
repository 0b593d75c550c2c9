//! Set-Associative Write-Back Cache.
//!
//! This module implements the single cache level between the processor and
//! main memory. It provides:
//! 1. **Address decomposition:** tag / set-index / block-offset split (`address`).
//! 2. **Storage:** sets of blocks sized from the configured geometry (`set`, `block`).
//! 3. **Replacement:** true LRU via a per-set recency stack (`lru`).
//! 4. **Write policy:** write-back with write-allocate; dirty victims are
//!    written to memory before they are refilled.
//!
//! Every access runs in two explicit phases: a pure [`Cache::lookup`], then on
//! a miss a mutating [`Cache::install`]. After the install the requested word
//! is resident, so the access completes exactly like a hit.

/// Address decomposition into tag, set index and block offset.
pub mod address;

/// Cache block (line) state.
pub mod block;

/// LRU recency stack.
pub mod lru;

/// Cache set.
pub mod set;

use tracing::{debug, trace};

use self::address::AddressDecoder;
use self::set::Set;
use crate::common::addr::WordAddr;
use crate::common::data::AccessType;
use crate::common::error::{ConfigError, ExecError};
use crate::config::CacheConfig;
use crate::memory::MainMemory;
use crate::trace::{TraceSink, Transfer, TransferEvent};

/// A request from the processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Instruction fetch.
    Fetch,
    /// Data load.
    Load,
    /// Data store of the given value.
    Store(i32),
}

impl Request {
    /// Access kind of this request.
    pub const fn kind(self) -> AccessType {
        match self {
            Self::Fetch => AccessType::Fetch,
            Self::Load => AccessType::Load,
            Self::Store(_) => AccessType::Store,
        }
    }
}

/// Whether the requested block was already resident.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOrMiss {
    /// Resident; served without touching memory.
    Hit,
    /// Not resident; the block was installed first.
    Miss,
}

/// Result of the lookup phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Resident in `way` of `set`.
    Hit {
        /// Set index.
        set: usize,
        /// Way index.
        way: usize,
    },
    /// Not resident in `set`.
    Miss {
        /// Set index.
        set: usize,
    },
}

/// Result of a completed access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Word read (fetch/load) or written (store).
    pub value: i32,
    /// Hit or miss.
    pub outcome: HitOrMiss,
    /// Whether a dirty victim was written back to serve this access.
    pub wrote_back: bool,
}

impl Access {
    /// Whether the access hit.
    pub fn is_hit(&self) -> bool {
        self.outcome == HitOrMiss::Hit
    }
}

/// Outcome of the install phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Install {
    way: usize,
    wrote_back: bool,
}

/// Set-associative, write-back, write-allocate cache with LRU replacement.
///
/// The cache owns its backing [`MainMemory`] and the [`TraceSink`] that
/// receives its transfer events.
#[derive(Debug)]
pub struct Cache<S> {
    config: CacheConfig,
    decoder: AddressDecoder,
    sets: Vec<Set>,
    memory: MainMemory,
    sink: S,
}

impl<S: TraceSink> Cache<S> {
    /// Creates an empty cache of the given geometry in front of `memory`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn new(config: CacheConfig, memory: MainMemory, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let decoder = AddressDecoder::new(&config)?;
        let sets = (0..config.num_sets)
            .map(|_| Set::new(config.associativity, config.block_size_words))
            .collect();

        debug!(
            block_size_words = config.block_size_words,
            num_sets = config.num_sets,
            associativity = config.associativity,
            tag_bits = decoder.tag_bits(),
            "cache initialised"
        );

        Ok(Self {
            config,
            decoder,
            sets,
            memory,
            sink,
        })
    }

    /// Geometry of this cache.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Address decoder for this geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// All sets, by index.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// Backing memory, as last written back. Resident dirty data is not visible here.
    pub const fn memory(&self) -> &MainMemory {
        &self.memory
    }

    /// Trace sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Trace sink, mutably.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Splits the cache into its memory and sink, discarding resident blocks.
    pub fn into_parts(self) -> (MainMemory, S) {
        (self.memory, self.sink)
    }

    /// Lookup phase: finds the way holding `addr`, without side effects.
    pub fn lookup(&self, addr: WordAddr) -> Lookup {
        let set = self.decoder.set_index(addr);
        let tag = self.decoder.tag(addr);
        match self.sets[set].find(tag) {
            Some(way) => Lookup::Hit { set, way },
            None => Lookup::Miss { set },
        }
    }

    /// Whether the block holding `addr` is resident.
    pub fn contains(&self, addr: WordAddr) -> bool {
        matches!(self.lookup(addr), Lookup::Hit { .. })
    }

    /// Resident copy of the word at `addr`, without touching recency order.
    pub fn peek(&self, addr: WordAddr) -> Option<i32> {
        match self.lookup(addr) {
            Lookup::Hit { set, way } => {
                Some(self.sets[set].block(way).read(self.decoder.block_offset(addr)))
            }
            Lookup::Miss { .. } => None,
        }
    }

    /// Serves one processor request.
    ///
    /// On a hit the block becomes most recently used; fetches and loads record
    /// a cache-to-nowhere transfer for the resident block. On a miss the block
    /// is installed first (see [`Cache::install`]). Finally the word moves
    /// between cache and processor: a store writes it and marks the block
    /// dirty, a fetch or load reads it.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::AddressOutOfRange`] if `addr` is outside memory.
    pub fn access(&mut self, addr: WordAddr, request: Request) -> Result<Access, ExecError> {
        let kind = request.kind();
        self.memory.check(addr, kind)?;

        let block_size = self.config.block_size_words;
        let (set, way, outcome, wrote_back) = match self.lookup(addr) {
            Lookup::Hit { set, way } => {
                if !kind.is_store() {
                    let base = self.decoder.block_base(addr);
                    self.emit(Transfer::CacheToNowhere, base, block_size);
                }
                self.sets[set].touch(way);
                (set, way, HitOrMiss::Hit, false)
            }
            Lookup::Miss { set } => {
                let install = self.install(addr)?;
                (set, install.way, HitOrMiss::Miss, install.wrote_back)
            }
        };

        let offset = self.decoder.block_offset(addr);
        let block = self.sets[set].block_mut(way);
        let (value, direction) = match request {
            Request::Store(value) => {
                block.write(offset, value);
                (value, Transfer::ProcessorToCache)
            }
            Request::Fetch | Request::Load => (block.read(offset), Transfer::CacheToProcessor),
        };
        self.emit(direction, addr, 1);

        trace!(%addr, %kind, ?outcome, value, "cache access");
        Ok(Access {
            value,
            outcome,
            wrote_back,
        })
    }

    /// Install phase: brings the block holding `addr` into its set.
    ///
    /// The victim is the first invalid way, else the least recently used way.
    /// A valid dirty victim is written back to its own base address before any
    /// part of it is overwritten. The new block is then read from memory,
    /// marked valid and clean, and promoted to most recently used.
    fn install(&mut self, addr: WordAddr) -> Result<Install, ExecError> {
        let block_size = self.config.block_size_words;
        let set = self.decoder.set_index(addr);
        let tag = self.decoder.tag(addr);
        let way = self.sets[set].victim();

        let mut wrote_back = false;
        if let Some((victim_tag, words)) = self.sets[set].block(way).write_back_contents() {
            let victim_base = self.decoder.block_address(victim_tag, set);
            self.memory.write_block(victim_base, words)?;
            debug!(%victim_base, set, way, "dirty block written back");
            self.emit(Transfer::CacheToMemory, victim_base, block_size);
            wrote_back = true;
        }

        let base = self.decoder.block_base(addr);
        let words = self.memory.block(base, block_size)?;
        let target = &mut self.sets[set];
        target.block_mut(way).fill(tag, words);
        target.touch(way);
        debug!(%base, set, way, tag, "block installed");
        self.emit(Transfer::MemoryToCache, base, block_size);

        Ok(Install { way, wrote_back })
    }

    /// Writes every dirty block back to memory and marks it clean.
    ///
    /// Blocks stay valid and recency order is untouched. Returns the number of
    /// blocks written.
    ///
    /// # Errors
    ///
    /// Propagates [`ExecError::AddressOutOfRange`] from a corrupt block address.
    pub fn flush(&mut self) -> Result<usize, ExecError> {
        let block_size = self.config.block_size_words;
        let mut flushed = 0;
        for set in 0..self.sets.len() {
            for way in 0..self.sets[set].ways() {
                let Some((tag, words)) = self.sets[set].block(way).write_back_contents() else {
                    continue;
                };
                let base = self.decoder.block_address(tag, set);
                self.memory.write_block(base, words)?;
                self.sets[set].block_mut(way).clean();
                self.emit(Transfer::CacheToMemory, base, block_size);
                flushed += 1;
            }
        }
        debug!(flushed, "cache flushed");
        Ok(flushed)
    }

    fn emit(&mut self, direction: Transfer, addr: WordAddr, size: usize) {
        let event = TransferEvent::new(addr.val(), size as u32, direction);
        trace!(target: "cachesim::trace", "{event}");
        self.sink.record(event);
    }
}
