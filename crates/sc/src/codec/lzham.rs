//! LZHAM inner codec.
//!
//! No maintained LZHAM binding exists in the Rust ecosystem, so this module implements the wire
//! framing faithfully (the [`SCLZ_MAGIC`][crate::SCLZ_MAGIC] sub-magic, dictionary size log2 byte,
//! and little-endian unpacked length) but cannot actually compress or decompress the payload: both
//! entry points return [`Error::InnerCodecFailure`] once the framing has been handled, the same
//! shape other archive tools in this ecosystem use for formats with no available codec.

use tracing::instrument;

use crate::{
	constants::{LZHAM_DICT_SIZE_LOG2, SCLZ_MAGIC},
	error::{Error, Result},
};

/// Write the LZHAM sub-header (sub-magic, dict size log2, unpacked length) and report that the
/// payload itself cannot be produced.
#[instrument(level = "debug", skip(data))]
pub fn compress(data: &[u8], _threads: u32) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(9);
	out.extend_from_slice(&SCLZ_MAGIC.to_le_bytes());
	out.push(LZHAM_DICT_SIZE_LOG2);
	out.extend_from_slice(&(data.len() as u32).to_le_bytes());
	Err(unsupported())
}

/// Parse the LZHAM sub-header and report that the payload itself cannot be decoded.
///
/// `data` is expected to start right after the [`SCLZ_MAGIC`] sub-magic has already been consumed
/// by the caller.
#[instrument(level = "debug", skip(data))]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
	if data.len() < 5 {
		return Err(Error::Truncated);
	}
	let _dict_size_log2 = data[0];
	let _unpacked_length = u32::from_le_bytes(data[1..5].try_into().unwrap());
	Err(unsupported())
}

fn unsupported() -> Error {
	Error::InnerCodecFailure {
		codec: "lzham",
		reason: "LZHAM compression is not supported".to_string(),
	}
}
