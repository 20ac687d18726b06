//! Top-level container compression.

use deku::prelude::*;
use sc_stream::{ByteStream, ByteStreamExt};
use tracing::{debug, instrument};

use crate::{
	codec,
	constants::{Signature, Version, SC_MAGIC},
	error::{Error, Result},
	header::Header,
	integrity::Hash,
	options::CompressOptions,
	reader::read_whole,
	trailer,
};

/// Compress `input` into an SC container written to `output`, per `options`.
#[instrument(level = "debug", skip(input, output, options))]
pub fn compress<I: ByteStream, O: ByteStream>(
	input: &mut I,
	output: &mut O,
	options: &CompressOptions,
) -> Result<()> {
	let data = read_whole(input)?;

	let outer_version = if options.write_assets {
		Version::Wrapped.to_u32()
	} else {
		options.signature.outer_version().to_u32()
	};
	let header = Header {
		magic: SC_MAGIC,
		version: outer_version,
	};
	let header_bytes = header
		.to_bytes()
		.map_err(|e| Error::InvalidParameters(format!("failed to encode header: {e}")))?;
	output.write(&header_bytes)?;

	if options.write_assets {
		output.write_u32_be(options.signature.outer_version().to_u32())?;
	}

	let hash = Hash::of(&data);
	output.write_u32_be(Hash::written_len())?;
	output.write(&hash)?;

	match options.signature {
		Signature::Lzma => {
			let compressed =
				codec::lzma::compress(&data, options.lzma_long_unpacked_length, options.threads)?;
			output.write(&compressed)?;
		}
		Signature::Lzham => {
			let compressed = codec::lzham::compress(&data, options.threads)?;
			output.write(&compressed)?;
		}
		Signature::Zstandard => {
			let compressed = codec::zstd::compress(&data, options.threads)?;
			output.write(&compressed)?;
		}
	}

	if options.write_assets {
		let mut trailer_bytes = Vec::new();
		trailer::write_placeholder_trailer(&mut trailer_bytes);
		output.write(&trailer_bytes)?;
	}

	debug!(
		input = data.len(),
		signature = ?options.signature,
		assets = options.write_assets,
		"compressed container"
	);
	Ok(())
}
