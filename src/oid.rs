//! Hex rendering of 12-byte ObjectIds.

use crate::{error::Result, output::OutputSink};

/// Length of an ObjectId on the wire.
pub(crate) const OID_RAW_LEN: usize = 12;

/// Length of an ObjectId rendered as hex text.
pub(crate) const OID_HEX_LEN: usize = OID_RAW_LEN * 2;

/// Writes the quoted 24-character lowercase hex form of an ObjectId, two
/// digits per byte, high nibble first.
pub(crate) fn write_object_id(sink: &mut OutputSink, bytes: &[u8; OID_RAW_LEN]) -> Result<()> {
    let mut hexed = [0u8; OID_HEX_LEN];
    // Unwrap safety: the output slice is exactly twice the input length.
    hex::encode_to_slice(bytes, &mut hexed).unwrap();
    sink.push(b'"')?;
    sink.put_slice(&hexed)?;
    sink.push(b'"')
}
