//! Zstandard inner codec.

use tracing::{instrument, trace};
use zstd_safe::{CCtx, DCtx, InBuffer, OutBuffer};

use crate::error::{Error, Result};

const COMPRESSION_LEVEL: i32 = 16;

/// Compress `data` with Zstandard, matching the writer's fixed parameters: level 16, no checksum,
/// content size written into the frame header, and `threads` workers when multithreading support
/// is compiled into `zstd-safe`.
#[instrument(level = "debug", skip(data))]
pub fn compress(data: &[u8], threads: u32) -> Result<Vec<u8>> {
	let mut cctx = CCtx::try_create().ok_or(Error::InnerCodecInit("zstandard"))?;
	cctx.set_parameter(zstd_safe::CParameter::CompressionLevel(COMPRESSION_LEVEL))
		.map_err(zstd_err("zstandard"))?;
	cctx.set_parameter(zstd_safe::CParameter::ChecksumFlag(false))
		.map_err(zstd_err("zstandard"))?;
	cctx.set_parameter(zstd_safe::CParameter::ContentSizeFlag(true))
		.map_err(zstd_err("zstandard"))?;
	if threads > 1 {
		// Best-effort: silently ignored by zstd-safe builds without multithread support.
		let _ = cctx.set_parameter(zstd_safe::CParameter::NbWorkers(threads as i32));
	}

	let bound = zstd_safe::compress_bound(data.len());
	let mut out = vec![0u8; bound];
	let written = cctx
		.compress2(&mut out, data)
		.map_err(zstd_err("zstandard"))?;
	out.truncate(written);
	trace!(input = data.len(), output = out.len(), "zstandard compressed");
	Ok(out)
}

/// Decompress a Zstandard frame, growing the output buffer step by step until the frame is
/// exhausted. Mirrors the grow-until-done shape used by the archive reader's frame iterator, just
/// collapsed into a single call since the whole payload is already in memory.
#[instrument(level = "debug", skip(data))]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
	let mut dctx = DCtx::try_create().ok_or(Error::InnerCodecInit("zstandard"))?;

	let mut input = InBuffer { src: data, pos: 0 };
	let mut result = Vec::new();

	loop {
		let output_size = DCtx::out_size().max(4096);
		let mut output_buf: Vec<u8> = Vec::with_capacity(output_size);
		let mut output = OutBuffer::around(&mut output_buf);

		let hint = dctx
			.decompress_stream(&mut output, &mut input)
			.map_err(zstd_err("zstandard"))?;
		let written = output.as_slice().len();
		drop(output);
		output_buf.truncate(written);
		result.extend_from_slice(&output_buf);

		if hint == 0 || (input.pos >= input.src.len() && written == 0) {
			break;
		}
	}

	Ok(result)
}

fn zstd_err(codec: &'static str) -> impl Fn(usize) -> Error {
	move |code| Error::InnerCodecFailure {
		codec,
		reason: zstd_safe::get_error_name(code).to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn roundtrip() {
		let data = b"the quick brown fox jumps over the lazy dog".repeat(100);
		let compressed = compress(&data, 1).unwrap();
		let decompressed = decompress(&compressed).unwrap();
		assert_eq!(decompressed, data);
	}
}
