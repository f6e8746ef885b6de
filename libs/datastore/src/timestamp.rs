//! Conversion between millisecond timestamps and their persisted form
//!
//! In memory a window bound is a millisecond count since the epoch; the
//! collaborator stores it as a `YYYY-MM-DD HH:MM:SS` UTC string. The
//! conversion is lossless at second granularity.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::DatastoreError;

/// The stored timestamp layout
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Encode a millisecond timestamp as the collaborator's stored form
pub fn to_date_string(timestamp: i64) -> Result<String, DatastoreError> {
	let datetime = DateTime::<Utc>::from_timestamp_millis(timestamp)
		.ok_or(DatastoreError::TimestampOutOfRange(timestamp))?;

	Ok(datetime.format(DATE_FORMAT).to_string())
}

/// Decode a stored timestamp into milliseconds since the epoch
///
/// Besides the stored form this also accepts a bare millisecond count and
/// RFC 3339 strings, both of which the hosted service has been seen to
/// return.
pub fn str_to_timestamp(value: &str) -> Result<i64, DatastoreError> {
	let value = value.trim();

	if let Ok(millis) = value.parse::<i64>() {
		return Ok(millis);
	}

	if let Ok(naive) = NaiveDateTime::parse_from_str(value, DATE_FORMAT) {
		return Ok(naive.and_utc().timestamp_millis());
	}

	if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
		return Ok(datetime.timestamp_millis());
	}

	Err(DatastoreError::MalformedTimestamp(value.to_string()))
}
