//! The document walker and the crate's public entry points.
//!
//! Transcoding is a single left-to-right pass: the walker reads each typed
//! element, emits its JSON rendering plus the surrounding framing, and never
//! revisits input or output bytes.

use std::{sync::Arc, thread};

use crate::{
    datetime, escape,
    error::{Error, Result},
    num, oid,
    output::{default_capacity, Handoff, OutputSink},
    reader::BsonReader,
    spec::ElementType,
};

/// Transcodes one BSON document to JSON with a growable output buffer.
///
/// `is_array` selects the top-level framing: `[...]` for a document whose
/// keys are array indices, `{...}` otherwise.
///
/// ```
/// # fn main() -> bson2json::Result<()> {
/// let json = bson2json::to_json(b"\x05\x00\x00\x00\x00", false)?;
/// assert_eq!(json, b"{}");
///
/// let doc = b"\x0C\x00\x00\x00\x10a\x00\x2A\x00\x00\x00\x00";
/// assert_eq!(bson2json::to_json(doc, false)?, b"{\"a\":42}");
/// # Ok(())
/// # }
/// ```
pub fn to_json(input: &[u8], is_array: bool) -> Result<Vec<u8>> {
    Transcoder::new().as_array(is_array).transcode(input)
}

/// Configuration for a single transcoding pass.
///
/// ```
/// use bson2json::Transcoder;
///
/// # fn main() -> bson2json::Result<()> {
/// let doc = b"\x0C\x00\x00\x00\x10a\x00\x2A\x00\x00\x00\x00".to_vec();
///
/// // One-shot, reallocating.
/// let json = Transcoder::new().transcode(&doc)?;
/// assert_eq!(json, b"{\"a\":42}");
///
/// // Streaming: pull bounded chunks off a producer thread.
/// let mut chunks = Transcoder::new().chunk_size(4).transcode_chunked(doc);
/// let mut json = Vec::new();
/// while let Some(chunk) = chunks.next_chunk()? {
///     assert!(chunk.len() <= 4);
///     json.extend_from_slice(chunk);
/// }
/// assert_eq!(json, b"{\"a\":42}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Transcoder {
    is_array: bool,
    chunk_size: usize,
    fixed_buffer: Option<Vec<u8>>,
}

impl Transcoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the top-level document as a JSON array instead of an object.
    pub fn as_array(mut self, is_array: bool) -> Self {
        self.is_array = is_array;
        self
    }

    /// Initial output capacity (one-shot) or chunk capacity (streaming).
    /// Zero picks a default from the input length.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Backs the output with a caller-owned buffer. Its capacity becomes the
    /// hard output limit in one-shot mode and the chunk capacity in
    /// streaming mode; no resizing occurs either way.
    pub fn fixed_buffer(mut self, buffer: Vec<u8>) -> Self {
        self.fixed_buffer = Some(buffer);
        self
    }

    /// Runs the transcoder to completion, returning the JSON bytes.
    pub fn transcode(self, input: &[u8]) -> Result<Vec<u8>> {
        let mut sink = match self.fixed_buffer {
            Some(buffer) => OutputSink::fixed(buffer),
            None => {
                let capacity = if self.chunk_size == 0 {
                    default_capacity(input.len())
                } else {
                    self.chunk_size
                };
                OutputSink::with_capacity(capacity)?
            }
        };
        let mut reader = BsonReader::new(input);
        run(&mut reader, &mut sink, self.is_array)?;
        Ok(sink.into_bytes())
    }

    /// Spawns a producer thread that owns `input` and transcodes on demand,
    /// returning the chunk puller. The producer does no work until the first
    /// pull and blocks whenever a chunk is waiting to be consumed.
    pub fn transcode_chunked(self, input: Vec<u8>) -> Chunks {
        let Self {
            is_array,
            chunk_size,
            fixed_buffer,
        } = self;
        let handoff = Arc::new(Handoff::new());
        let shared = Arc::clone(&handoff);

        let worker = thread::spawn(move || {
            if !shared.wait_for_first_pull() {
                return;
            }
            let buffer = match fixed_buffer {
                Some(buffer) => buffer,
                None => {
                    let capacity = if chunk_size == 0 {
                        default_capacity(input.len())
                    } else {
                        chunk_size
                    };
                    let mut buffer = Vec::new();
                    if buffer.try_reserve_exact(capacity).is_err() {
                        shared.finish(Vec::new(), Some(Error::AllocationFailure));
                        return;
                    }
                    buffer
                }
            };
            let mut sink = OutputSink::paused(buffer, Arc::clone(&shared));
            let mut reader = BsonReader::new(&input);
            match run(&mut reader, &mut sink, is_array) {
                Ok(()) => shared.finish(sink.into_bytes(), None),
                // The consumer is gone; there is nobody to report to.
                Err(Error::ConsumerDisconnected) => {}
                Err(err) => shared.finish(Vec::new(), Some(err)),
            }
        });

        Chunks {
            handoff,
            current: None,
            finished: false,
            worker: Some(worker),
        }
    }
}

/// A pull-based stream of JSON chunks produced by
/// [`Transcoder::transcode_chunked`].
///
/// Chunks arrive in emission order and are bounded by the configured
/// capacity; their concatenation is byte-identical to the one-shot result.
/// An error mid-stream ends the stream with `Err` instead of end-of-stream.
/// [`next_chunk`](Chunks::next_chunk) lends the buffer without copying; the
/// [`Iterator`] impl copies each chunk out instead.
pub struct Chunks {
    handoff: Arc<Handoff>,
    current: Option<Vec<u8>>,
    finished: bool,
    worker: Option<thread::JoinHandle<()>>,
}

impl Chunks {
    /// Returns the next chunk, or `None` once the input is exhausted.
    ///
    /// The previous chunk's storage is recycled on each call, so the
    /// returned slice is only valid until the next pull.
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        if self.finished {
            return Ok(None);
        }
        match self.handoff.pull(self.current.take()) {
            Some(Ok(chunk)) => {
                self.current = Some(chunk);
                Ok(self.current.as_deref())
            }
            Some(Err(err)) => {
                self.finish();
                Err(err)
            }
            None => {
                self.finish();
                Ok(None)
            }
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Iterator for Chunks {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk.to_vec())),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl Drop for Chunks {
    fn drop(&mut self) {
        if !self.finished {
            self.handoff.abandon();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Validates the top-level frame, then walks the document.
fn run(reader: &mut BsonReader<'_>, sink: &mut OutputSink, is_array: bool) -> Result<()> {
    let size = reader.peek_i32()?;
    if size < 5 {
        return Err(Error::SizeTooSmall);
    }
    let size = size as usize;
    if size > reader.len() {
        return Err(Error::SizeExceedsInput);
    }
    if reader.byte_at(size - 1) != Some(0) {
        return Err(Error::MissingTerminator);
    }
    transcode_container(reader, sink, is_array)
}

/// Walks one document or array, emitting its framing and elements.
fn transcode_container(
    reader: &mut BsonReader<'_>,
    sink: &mut OutputSink,
    is_array: bool,
) -> Result<()> {
    let size = reader.read_i32()?;
    if size < 5 {
        return Err(Error::SizeTooSmall);
    }
    if size as usize > reader.len() {
        return Err(Error::SizeExceedsInput);
    }

    sink.push(if is_array { b'[' } else { b'{' })?;

    let mut index: i32 = 0;
    let mut wrote_element = false;

    loop {
        let tag = reader.read_u8()?;
        if tag == 0 {
            break;
        }
        let element_type = ElementType::from(tag).ok_or(Error::UnknownType)?;

        // Deprecated Undefined elements vanish from the output entirely, so
        // their key is consumed here and no comma is accounted for them.
        if element_type == ElementType::Undefined {
            if is_array {
                skip_array_key(reader, index)?;
            } else {
                reader.cstring()?;
            }
            index += 1;
            continue;
        }

        if wrote_element {
            sink.push(b',')?;
        }

        if is_array {
            skip_array_key(reader, index)?;
        } else {
            sink.push(b'"')?;
            let key = reader.cstring()?;
            escape::write_escaped(sink, key)?;
            sink.put_slice(b"\":")?;
        }

        match element_type {
            ElementType::String => {
                let size = reader.read_i32()?;
                if size < 1 {
                    return Err(Error::BadStringLength);
                }
                let size = size as usize;
                let bytes = reader.take(size).map_err(|_| Error::BadStringLength)?;
                if bytes[size - 1] != 0 {
                    return Err(Error::BadStringLength);
                }
                sink.push(b'"')?;
                escape::write_escaped(sink, &bytes[..size - 1])?;
                sink.push(b'"')?;
            }
            ElementType::ObjectId => {
                let raw = reader.take(oid::OID_RAW_LEN)?;
                // Unwrap safety: `take` returned exactly twelve bytes.
                oid::write_object_id(sink, raw.try_into().unwrap())?;
            }
            ElementType::Int32 => {
                num::write_int(sink, reader.read_i32()?)?;
            }
            ElementType::Double => {
                let value = reader.read_f64()?;
                if value.is_finite() {
                    num::write_double(sink, value)?;
                } else {
                    sink.put_slice(b"null")?;
                }
            }
            ElementType::DateTime => {
                datetime::write_datetime(sink, reader.read_i64()?)?;
            }
            ElementType::Boolean => match reader.read_u8()? {
                0 => sink.put_slice(b"false")?,
                1 => sink.put_slice(b"true")?,
                _ => return Err(Error::IllegalBoolean),
            },
            ElementType::EmbeddedDocument => {
                transcode_container(reader, sink, false)?;
            }
            ElementType::Array => {
                transcode_container(reader, sink, true)?;
                if reader.prev_byte() != Some(0) {
                    return Err(Error::InvalidArrayTerminator);
                }
            }
            ElementType::Null => {
                sink.put_slice(b"null")?;
            }
            ElementType::Int64 => {
                num::write_int(sink, reader.read_i64()?)?;
            }
            ElementType::Binary
            | ElementType::RegularExpression
            | ElementType::DbPointer
            | ElementType::JavaScriptCode
            | ElementType::Symbol
            | ElementType::JavaScriptCodeWithScope
            | ElementType::Timestamp
            | ElementType::Decimal128
            | ElementType::MinKey
            | ElementType::MaxKey => {
                return Err(Error::IncompatibleType);
            }
            ElementType::Undefined => unreachable!("handled before key emission"),
        }

        wrote_element = true;
        index += 1;
    }

    sink.push(if is_array { b']' } else { b'}' })
}

/// Skips an array element's decimal index key by the running index's digit
/// count. The encoder writes the keys in order, so the terminator lands at a
/// known offset; a producer that shipped out-of-order or oversized indices
/// falls back to scanning for the terminator.
fn skip_array_key(reader: &mut BsonReader<'_>, index: i32) -> Result<()> {
    let width = num::array_key_width(index);
    if reader.byte_at(reader.pos() + width - 1) == Some(0) {
        return reader.skip(width);
    }
    reader.cstring().map(|_| ())
}
