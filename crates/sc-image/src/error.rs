//! Error type for the image container wrappers.

use thiserror::Error;

/// Errors that can occur while reading or writing a KTX or ASTC container.
#[derive(Debug, Error)]
pub enum Error {
	/// The file does not start with the KTX identifier.
	#[error("not a KTX 1.1 file")]
	BadKtxIdentifier,

	/// The file does not start with the ASTC file identifier.
	#[error("not an ASTC container")]
	BadAstcIdentifier,

	/// The KTX endianness field was neither the native nor swapped reference value.
	#[error("unrecognised KTX endianness marker {0:#010x}")]
	BadEndianness(u32),

	/// The stream ended before a required field or blob could be fully read.
	#[error("container is truncated")]
	Truncated,

	/// Caller-supplied parameters were invalid.
	#[error("invalid parameters: {0}")]
	InvalidParameters(String),

	/// Underlying stream I/O failure.
	#[error(transparent)]
	IOFailure(#[from] sc_stream::error::StreamError),
}

/// Convenience return type for image container operations.
pub type Result<T> = std::result::Result<T, Error>;
