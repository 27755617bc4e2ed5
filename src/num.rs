//! Decimal text for the numeric BSON types.

use crate::{error::Result, output::OutputSink};

/// Writes the decimal representation of a signed integer.
///
/// At most 11 bytes for an `i32` and 20 bytes for an `i64`, sign included.
pub(crate) fn write_int<V: itoa::Integer>(sink: &mut OutputSink, value: V) -> Result<()> {
    let mut buffer = itoa::Buffer::new();
    sink.put_slice(buffer.format(value).as_bytes())
}

/// Writes the shortest decimal text that round-trips `value` under IEEE-754
/// binary64, in the exact form `Number.prototype.toString` produces.
///
/// Only defined for finite values; the transcoder renders non-finite doubles
/// as the `null` literal before reaching this point.
pub(crate) fn write_double(sink: &mut OutputSink, value: f64) -> Result<()> {
    debug_assert!(value.is_finite());
    let mut buffer = ryu_js::Buffer::new();
    sink.put_slice(buffer.format_finite(value).as_bytes())
}

/// On-wire length of a BSON array index key, null terminator included.
///
/// Array documents spell their keys as decimal strings ("0", "1", ...), so an
/// in-order reader can skip each key by the digit count of the running index
/// instead of scanning for the terminator.
pub(crate) fn array_key_width(index: i32) -> usize {
    debug_assert!(index >= 0);
    if index < 10 {
        return 2;
    }
    if index < 100 {
        return 3;
    }
    if index < 1_000 {
        return 4;
    }
    if index < 10_000 {
        return 5;
    }
    if index < 100_000 {
        return 6;
    }
    if index < 1_000_000 {
        return 7;
    }
    if index < 10_000_000 {
        return 8;
    }
    if index < 100_000_000 {
        return 9;
    }
    if index < 1_000_000_000 {
        return 10;
    }
    11
}
