//! Streaming transcoder from raw BSON bytes to a JSON byte stream.
//!
//! A BSON document is transcoded in a single linear pass with no
//! intermediate value tree: string bytes are copied (escaped where JSON
//! requires it), numeric and date values get specialized text conversions,
//! and the `{}`/`[]`/`"`/`,` framing is inserted in place.
//!
//! ```text
//! // JSON output
//! {"hello":"world"}
//!
//! // BSON input
//! \x16\x00\x00\x00                   // total document size
//! \x02                               // 0x02 = type String
//! hello\x00                          // field name
//! \x06\x00\x00\x00world\x00          // field value
//! \x00                               // 0x00 = type EOO ('end of object')
//! ```
//!
//! # One-shot transcoding
//!
//! [`to_json`] converts a whole document at once, growing the output buffer
//! as needed:
//!
//! ```
//! # fn main() -> bson2json::Result<()> {
//! let doc = b"\x16\x00\x00\x00\x02hello\x00\x06\x00\x00\x00world\x00\x00";
//! let json = bson2json::to_json(doc, false)?;
//! assert_eq!(json, b"{\"hello\":\"world\"}");
//! # Ok(())
//! # }
//! ```
//!
//! # Chunked transcoding
//!
//! [`Transcoder::transcode_chunked`] runs the transcoder on a producer
//! thread and yields the output as bounded chunks, so arbitrarily large
//! documents stream through a fixed amount of memory:
//!
//! ```
//! use bson2json::Transcoder;
//!
//! # fn main() -> bson2json::Result<()> {
//! let doc = b"\x16\x00\x00\x00\x02hello\x00\x06\x00\x00\x00world\x00\x00".to_vec();
//! let mut json = Vec::new();
//! let mut chunks = Transcoder::new().chunk_size(8).transcode_chunked(doc);
//! while let Some(chunk) = chunks.next_chunk()? {
//!     json.extend_from_slice(chunk);
//! }
//! assert_eq!(json, b"{\"hello\":\"world\"}");
//! # Ok(())
//! # }
//! ```
//!
//! # Type mapping
//!
//! | BSON | JSON |
//! |---|---|
//! | string, int32, int64, boolean, null | the equivalent JSON value |
//! | double | shortest round-trip decimal; `NaN`/`±Infinity` become `null` |
//! | ObjectId | 24-character lowercase hex string |
//! | datetime | `"YYYY-MM-DDTHH:MM:SS.mmmZ"` |
//! | document, array | nested JSON object / array |
//! | undefined (deprecated) | omitted from the output |
//!
//! Types with no direct JSON encoding (binary, regex, decimal128,
//! timestamp, code, symbol, db-pointer, min/max key) are a fatal
//! [`Error::IncompatibleType`]; transcoding is all-or-nothing per document.
//!
//! The input is trusted to be UTF-8 where BSON says so; no validation is
//! performed and string bytes at or above 0x80 pass through unchanged.

mod datetime;
mod error;
mod escape;
mod isa;
mod num;
mod oid;
mod output;
mod reader;
pub mod spec;
mod transcoder;

pub use crate::{
    error::{Error, Result},
    isa::active_isa,
    transcoder::{to_json, Chunks, Transcoder},
};
