//! Error type for the container codec.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while reading or writing an SC container.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
	/// The file does not start with the SC magic bytes.
	#[error("not an SC container: bad magic {found:#06x}")]
	#[diagnostic(code(sc::bad_magic))]
	BadMagic {
		/// The two bytes that were found instead of [`SC_MAGIC`][crate::SC_MAGIC].
		found: u16,
	},

	/// The version field is not one this crate understands.
	#[error("unsupported container version {0}")]
	#[diagnostic(code(sc::unsupported_version))]
	UnsupportedVersion(u32),

	/// The stream ended before a required field could be fully read.
	#[error("container is truncated")]
	#[diagnostic(code(sc::truncated))]
	Truncated,

	/// The version-4 metadata trailer's backward-pointer structure didn't check out.
	#[error("metadata trailer is malformed: {0}")]
	#[diagnostic(code(sc::trailer_malformed))]
	TrailerMalformed(String),

	/// The MD5 hash recorded in the header didn't match the decompressed payload.
	#[error("hash mismatch: container is corrupt or was tampered with")]
	#[diagnostic(code(sc::hash_mismatch))]
	HashMismatch,

	/// An inner codec context could not be initialised.
	#[error("failed to initialise {0} codec")]
	#[diagnostic(code(sc::inner_codec_init))]
	InnerCodecInit(&'static str),

	/// An inner codec failed while compressing or decompressing.
	#[error("{codec} codec failed: {reason}")]
	#[diagnostic(code(sc::inner_codec_failure))]
	InnerCodecFailure {
		/// Name of the codec that failed.
		codec: &'static str,
		/// What went wrong.
		reason: String,
	},

	/// A buffer could not be allocated or grown.
	#[error("allocation failure: {0}")]
	#[diagnostic(code(sc::allocation_failure))]
	AllocationFailure(String),

	/// Caller-supplied options were invalid.
	#[error("invalid parameters: {0}")]
	#[diagnostic(code(sc::invalid_parameters))]
	InvalidParameters(String),

	/// Underlying stream I/O failure.
	#[error(transparent)]
	#[diagnostic(code(sc::io_failure))]
	IOFailure(#[from] sc_stream::error::StreamError),
}

/// Convenience return type for container operations.
pub type Result<T> = std::result::Result<T, Error>;
