//! ISO-8601 rendering of BSON datetimes.
//!
//! BSON encodes a datetime as signed milliseconds since the Unix epoch, UTC.
//! The JSON text is the 24-character `YYYY-MM-DDTHH:MM:SS.mmmZ` layout that
//! `Date.prototype.toISOString` produces, millisecond precision, years
//! zero-padded to four digits.

use std::io::Cursor;

use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};

use crate::{
    error::{Error, Result},
    output::OutputSink,
};

const ISO8601_MILLIS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Length of a formatted datetime, quotes not included.
pub(crate) const DATETIME_TEXT_LEN: usize = 24;

/// Writes the quoted ISO-8601 form of `millis` since the Unix epoch.
///
/// Pre-1970 values carry into the previous second, so `-1` renders as
/// `1969-12-31T23:59:59.999Z`. Years outside 0000-9999 do not fit the fixed
/// layout and report [`Error::DateOutOfRange`].
pub(crate) fn write_datetime(sink: &mut OutputSink, millis: i64) -> Result<()> {
    let timestamp = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|_| Error::DateOutOfRange)?;

    let mut text = [0u8; DATETIME_TEXT_LEN];
    let mut cursor = Cursor::new(&mut text[..]);
    timestamp
        .format_into(&mut cursor, ISO8601_MILLIS)
        .map_err(|_| Error::DateOutOfRange)?;
    let written = cursor.position() as usize;

    sink.push(b'"')?;
    sink.put_slice(&text[..written])?;
    sink.push(b'"')
}
