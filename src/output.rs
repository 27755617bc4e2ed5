//! Output buffer policies for the transcoder.
//!
//! The sink owns the JSON bytes as they are produced. Three policies cover
//! the ways callers consume output:
//!
//! - reallocating: the buffer grows by half (or to the requested size,
//!   whichever is larger) whenever a write would not fit;
//! - fixed: the caller supplied the buffer and growth is forbidden;
//! - paused: the buffer is a fixed-size chunk that bounces between the
//!   producing transcoder thread and a consumer pulling chunks in order.

use std::{cmp, mem, sync::Arc};

use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};

/// Expansion estimate used when no capacity was requested: mixed data
/// expands around 2.3x (ObjectId 12B -> 26B, int 5B -> up to 11B, null
/// 1B -> 4B), string-heavy data closer to 1x.
pub(crate) fn default_capacity(input_len: usize) -> usize {
    (input_len * 10) / 4
}

enum Policy {
    Realloc,
    Fixed,
    Pause(Arc<Handoff>),
}

pub(crate) struct OutputSink {
    buf: Vec<u8>,
    policy: Policy,
}

impl OutputSink {
    /// A growable sink seeded with `capacity` bytes.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailure)?;
        Ok(Self {
            buf,
            policy: Policy::Realloc,
        })
    }

    /// A sink backed by a caller-owned buffer; its capacity is the hard
    /// output limit.
    pub(crate) fn fixed(mut buf: Vec<u8>) -> Self {
        buf.clear();
        Self {
            buf,
            policy: Policy::Fixed,
        }
    }

    /// A sink that publishes `buf`-sized chunks through `handoff` whenever
    /// the buffer fills.
    pub(crate) fn paused(mut buf: Vec<u8>, handoff: Arc<Handoff>) -> Self {
        buf.clear();
        Self {
            buf,
            policy: Policy::Pause(handoff),
        }
    }

    fn free(&self) -> usize {
        self.buf.capacity() - self.buf.len()
    }

    /// Makes room for at least `needed` more bytes, growing, failing, or
    /// handing the current chunk to the consumer depending on policy.
    fn make_room(&mut self, needed: usize) -> Result<()> {
        match &self.policy {
            Policy::Realloc => {
                let capacity = self.buf.capacity();
                let target = cmp::max(capacity + capacity / 2, self.buf.len() + needed);
                self.buf
                    .try_reserve_exact(target - self.buf.len())
                    .map_err(|_| Error::AllocationFailure)
            }
            Policy::Fixed => Err(Error::AllocationFailure),
            Policy::Pause(handoff) => {
                if self.buf.capacity() == 0 {
                    return Err(Error::AllocationFailure);
                }
                handoff.publish(&mut self.buf)
            }
        }
    }

    /// Appends one byte.
    pub(crate) fn push(&mut self, byte: u8) -> Result<()> {
        if self.free() == 0 {
            self.make_room(1)?;
        }
        self.buf.push(byte);
        Ok(())
    }

    /// Appends a slice. In paused mode a slice longer than the remaining
    /// chunk space is split at the capacity boundary.
    pub(crate) fn put_slice(&mut self, mut bytes: &[u8]) -> Result<()> {
        loop {
            let free = self.free();
            if bytes.len() <= free {
                self.buf.extend_from_slice(bytes);
                return Ok(());
            }
            if let Policy::Pause(_) = self.policy {
                self.buf.extend_from_slice(&bytes[..free]);
                bytes = &bytes[free..];
            }
            self.make_room(bytes.len())?;
        }
    }

    /// Consumes the sink, yielding whatever was written so far.
    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Shared state for the paused-mode chunk exchange.
///
/// A single buffer travels between the producer and the consumer: the
/// producer fills it, publishes it, and blocks until the consumer hands the
/// drained buffer back. Chunks therefore arrive in exactly emission order
/// and are bounded by the configured capacity.
pub(crate) struct Handoff {
    slot: Mutex<Slot>,
    /// Signaled when a chunk is published or the stream finishes.
    produced: Condvar,
    /// Signaled on the first pull, on buffer return, and on abandonment.
    consumed: Condvar,
}

#[derive(Default)]
struct Slot {
    /// A filled chunk awaiting pickup.
    chunk: Option<Vec<u8>>,
    /// The drained buffer travelling back to the producer.
    spare: Option<Vec<u8>>,
    /// Set by the first pull; the producer does no work before it.
    started: bool,
    /// Set once the producer has finished, successfully or not.
    done: bool,
    err: Option<Error>,
    /// Set when the consumer is dropped mid-stream.
    abandoned: bool,
}

impl Handoff {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::default()),
            produced: Condvar::new(),
            consumed: Condvar::new(),
        }
    }

    /// Blocks the producer until the consumer pulls for the first time.
    /// Returns `false` if the stream was abandoned before that.
    pub(crate) fn wait_for_first_pull(&self) -> bool {
        let mut slot = self.slot.lock();
        while !slot.started && !slot.abandoned {
            self.consumed.wait(&mut slot);
        }
        !slot.abandoned
    }

    /// Publishes the filled buffer as the next chunk and blocks until the
    /// consumer returns the drained buffer.
    pub(crate) fn publish(&self, buf: &mut Vec<u8>) -> Result<()> {
        let mut slot = self.slot.lock();
        if slot.abandoned {
            return Err(Error::ConsumerDisconnected);
        }
        debug_assert!(slot.chunk.is_none(), "published over an unconsumed chunk");
        slot.chunk = Some(mem::take(buf));
        self.produced.notify_one();
        loop {
            if slot.abandoned {
                return Err(Error::ConsumerDisconnected);
            }
            if let Some(spare) = slot.spare.take() {
                *buf = spare;
                return Ok(());
            }
            self.consumed.wait(&mut slot);
        }
    }

    /// Ends the stream. On success the final partial chunk (if any) rides
    /// along; on error any partial output is discarded.
    pub(crate) fn finish(&self, tail: Vec<u8>, err: Option<Error>) {
        let mut slot = self.slot.lock();
        if err.is_none() && !tail.is_empty() {
            debug_assert!(slot.chunk.is_none(), "finished over an unconsumed chunk");
            slot.chunk = Some(tail);
        }
        slot.err = err;
        slot.done = true;
        self.produced.notify_one();
    }

    /// Returns the previous chunk's buffer (if any) and blocks until the
    /// next chunk, an error, or end-of-stream.
    pub(crate) fn pull(&self, returned: Option<Vec<u8>>) -> Option<Result<Vec<u8>>> {
        let mut slot = self.slot.lock();
        slot.started = true;
        if let Some(mut buf) = returned {
            buf.clear();
            slot.spare = Some(buf);
        }
        self.consumed.notify_one();
        loop {
            if let Some(chunk) = slot.chunk.take() {
                return Some(Ok(chunk));
            }
            if let Some(err) = slot.err.take() {
                return Some(Err(err));
            }
            if slot.done {
                return None;
            }
            self.produced.wait(&mut slot);
        }
    }

    /// Tells a still-running producer that nobody will pull again.
    pub(crate) fn abandon(&self) {
        let mut slot = self.slot.lock();
        slot.abandoned = true;
        self.consumed.notify_one();
    }
}
