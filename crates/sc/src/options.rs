//! Caller-facing options for compression.

use crate::constants::Signature;

/// Options controlling how [`crate::compress`] writes a container.
#[derive(Clone, Debug)]
pub struct CompressOptions {
	/// Which inner codec to compress the payload with.
	pub signature: Signature,

	/// Whether to write a version-4 container with an asset metadata trailer.
	pub write_assets: bool,

	/// Worker thread count passed to the inner codec (Zstandard multithreaded compression, or
	/// the LZMA/LZHAM helper-thread count). `0` falls back to the number of available cores.
	pub threads: u32,

	/// Widen the LZMA unpacked-length field written after the codec properties to 64 bits.
	///
	/// Write-only: the reader always reads a fixed 4-byte little-endian length, matching the
	/// original tool, so containers written with this set are not round-trippable by this crate's
	/// own reader.
	pub lzma_long_unpacked_length: bool,
}

impl Default for CompressOptions {
	fn default() -> Self {
		Self {
			signature: Signature::Zstandard,
			write_assets: false,
			threads: available_threads(),
			lzma_long_unpacked_length: false,
		}
	}
}

fn available_threads() -> u32 {
	std::thread::available_parallelism()
		.map(|n| n.get() as u32)
		.unwrap_or(1)
}
