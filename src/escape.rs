//! JSON string escaping per ECMA-404 §9.
//!
//! Bytes below 0x20 plus `"` and `\` are escaped; everything else is copied
//! verbatim, so the input's UTF-8 encoding passes through untouched (no
//! validation is performed, and replacement-character bytes already present
//! in the input are preserved as-is).

use crate::{error::Result, isa, output::OutputSink};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// True for bytes that cannot appear verbatim inside a JSON string.
#[inline]
pub(crate) const fn needs_escape(byte: u8) -> bool {
    byte < 0x20 || byte == b'"' || byte == b'\\'
}

/// Length of the longest prefix of `bytes` that can be copied verbatim.
///
/// The scalar scan kernel; also the definition of correctness for the
/// vectorized kernels in [`crate::isa`].
#[inline]
pub(crate) fn clean_prefix_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|&b| needs_escape(b))
        .unwrap_or(bytes.len())
}

/// Writes `bytes` with JSON string escaping applied.
///
/// Escape-free stretches are located by the process-wide scan kernel and
/// emitted as blocks; each escape-triggering byte is handled individually.
pub(crate) fn write_escaped(sink: &mut OutputSink, bytes: &[u8]) -> Result<()> {
    let scan = isa::escape_scan();
    let mut rest = bytes;
    while !rest.is_empty() {
        let clean = scan(rest);
        if clean > 0 {
            sink.put_slice(&rest[..clean])?;
            rest = &rest[clean..];
        }
        if let Some((&byte, tail)) = rest.split_first() {
            write_escape_sequence(sink, byte)?;
            rest = tail;
        }
    }
    Ok(())
}

fn write_escape_sequence(sink: &mut OutputSink, byte: u8) -> Result<()> {
    let short: &[u8] = match byte {
        0x08 => b"\\b",
        0x09 => b"\\t",
        0x0A => b"\\n",
        0x0C => b"\\f",
        0x0D => b"\\r",
        0x22 => b"\\\"",
        0x5C => b"\\\\",
        control => {
            return sink.put_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX_DIGITS[(control >> 4) as usize],
                HEX_DIGITS[(control & 0x0F) as usize],
            ]);
        }
    };
    sink.put_slice(short)
}
