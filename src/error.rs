use thiserror::Error;

/// Alias for `Result<T, bson2json::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while transcoding a BSON document to JSON.
///
/// Transcoding is all-or-nothing: the first error unwinds the document walk
/// and no JSON output is surfaced for the failed document. In chunked mode an
/// error terminates the chunk stream with `Err` rather than end-of-stream.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A document or array length prefix is below the 5-byte minimum.
    #[error("BSON size must be >=5")]
    SizeTooSmall,

    /// A document or array length prefix runs past the end of the input.
    #[error("BSON size exceeds input length.")]
    SizeExceedsInput,

    /// The top-level document does not end with a zero byte.
    #[error("BSON document not null terminated")]
    MissingTerminator,

    /// A string length prefix is non-positive, runs past the end of the
    /// input, or the string is missing its null terminator.
    #[error("Bad string length")]
    BadStringLength,

    /// A boolean element holds a byte other than 0 or 1.
    #[error("illegal boolean type value")]
    IllegalBoolean,

    /// A nested array did not end on a zero byte.
    #[error("Invalid array terminator byte")]
    InvalidArrayTerminator,

    /// Growing the output buffer failed, or a fixed output buffer ran out of
    /// space.
    #[error("Allocation failure")]
    AllocationFailure,

    /// An element carries a type tag the BSON specification does not assign.
    #[error("Unknown BSON type")]
    UnknownType,

    /// An element's type has no direct JSON encoding (binary, regex,
    /// decimal128, timestamp, code, symbol, db-pointer, min/max key).
    #[error("BSON type incompatible with JSON")]
    IncompatibleType,

    /// The input ended in the middle of an element.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A datetime does not fit the 0000-9999 ISO-8601 year range.
    #[error("BSON date out of range")]
    DateOutOfRange,

    /// The chunk consumer went away while the producer was still running.
    /// Only used to stop an abandoned producer thread; never yielded by
    /// [`Chunks`](crate::Chunks).
    #[error("consumer disconnected")]
    ConsumerDisconnected,
}
