//! Error type for stream operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a [`ByteStream`][crate::ByteStream].
#[derive(Debug, Error)]
pub enum StreamError {
	/// The stream has been closed and no further operations are possible.
	#[error("stream is closed")]
	Closed,

	/// A seek or read would have landed outside the stream's bounds.
	#[error("seek or read out of bounds: offset {offset} against length {length}")]
	OutOfBounds {
		/// The offset that was requested.
		offset: i64,
		/// The stream's length at the time of the request.
		length: u64,
	},

	/// Underlying I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Convenience return type for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
