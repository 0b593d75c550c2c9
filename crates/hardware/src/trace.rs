//! Transfer trace.
//!
//! Every movement of data between the processor, the cache and main memory is
//! reported as a [`TransferEvent`]. The sequence of events is the primary
//! compatibility surface of the simulator: two runs of the same program under
//! the same geometry must produce identical traces, and each event prints as
//!
//! ```text
//! transferring word [<first>-<last>] from the <source> to the <destination>
//! ```
//!
//! Events are delivered to a [`TraceSink`]. The cache owns its sink; tests use
//! [`TraceLog`] to inspect what was recorded, the command line uses
//! [`WriterSink`] to print it.

use std::fmt;
use std::io::{self, Write};

/// Direction of a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transfer {
    /// A word read by the processor (fetch or load).
    CacheToProcessor,
    /// A word written by the processor (store).
    ProcessorToCache,
    /// A block filled from memory on a miss.
    MemoryToCache,
    /// A dirty block written back on eviction or flush.
    CacheToMemory,
    /// A block that was already resident; nothing moves.
    CacheToNowhere,
}

impl Transfer {
    /// Text used for this direction in the printed trace.
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::CacheToProcessor => "from the cache to the processor",
            Self::ProcessorToCache => "from the processor to the cache",
            Self::MemoryToCache => "from the memory to the cache",
            Self::CacheToMemory => "from the cache to the memory",
            Self::CacheToNowhere => "from the cache to nowhere",
        }
    }
}

/// One transfer of `size` words starting at `addr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransferEvent {
    /// First word address in the range.
    pub addr: u32,
    /// Number of words moved.
    pub size: u32,
    /// Source and destination.
    pub direction: Transfer,
}

impl TransferEvent {
    /// Creates an event.
    pub const fn new(addr: u32, size: u32, direction: Transfer) -> Self {
        Self {
            addr,
            size,
            direction,
        }
    }

    /// Last word address in the range.
    pub const fn last_addr(&self) -> u32 {
        self.addr.wrapping_add(self.size).wrapping_sub(1)
    }
}

impl fmt::Display for TransferEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transferring word [{}-{}] {}",
            self.addr,
            self.last_addr(),
            self.direction.phrase()
        )
    }
}

/// Receiver of transfer events, in emission order.
pub trait TraceSink {
    /// Records one event.
    fn record(&mut self, event: TransferEvent);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, event: TransferEvent) {
        (**self).record(event);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn record(&mut self, event: TransferEvent) {
        (**self).record(event);
    }
}

/// In-memory recorder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceLog {
    events: Vec<TransferEvent>,
}

impl TraceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[TransferEvent] {
        &self.events
    }

    /// Directions of the recorded events, in order.
    pub fn directions(&self) -> Vec<Transfer> {
        self.events.iter().map(|e| e.direction).collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Consumes the log, returning its events.
    pub fn into_events(self) -> Vec<TransferEvent> {
        self.events
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: TransferEvent) {
        self.events.push(event);
    }
}

/// Prints one line per event to a writer.
///
/// `record` cannot fail, so the first write error is kept and returned by
/// [`WriterSink::finish`]; later events are dropped.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    /// Wraps `out`.
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes buffered output, or reports the first failure seen while recording.
    ///
    /// # Errors
    ///
    /// Returns the first recording error, or the flush error.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }

    /// Flushes the writer and hands it back, or reports the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error seen while recording, or the flush error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn record(&mut self, event: TransferEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{event}") {
            self.error = Some(e);
        }
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: TransferEvent) {}
}
