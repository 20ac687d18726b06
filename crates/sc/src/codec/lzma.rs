//! LZMA inner codec.
//!
//! The container's version-1 payload, when it's not LZHAM, is a raw LZMA1 stream preceded by the
//! classic 5-byte properties header (one props byte packing `lc`/`lp`/`pb`, then a little-endian
//! 4-byte dictionary size) and a little-endian unpacked-length field.

use liblzma::stream::{Action, Filters, LzmaOptions, Status, Stream};
use tracing::{instrument, trace};

use crate::error::{Error, Result};

/// Wire length of the properties header (props byte + 4-byte dictionary size).
pub const PROPS_SIZE: usize = 5;

const DICT_SIZE: u32 = 262_144;
const PRESET: u32 = 6;

#[derive(Clone, Copy, Debug)]
struct Props {
	lc: u32,
	lp: u32,
	pb: u32,
}

fn props_for(input_len: usize) -> Props {
	Props {
		lc: if input_len > 1 << 28 { 4 } else { 3 },
		lp: 0,
		pb: 2,
	}
}

fn props_byte(p: Props) -> u8 {
	((p.pb * 5 + p.lp) * 9 + p.lc) as u8
}

fn props_from_byte(byte: u8) -> Props {
	let pb = (byte / 45) as u32;
	let rem = byte % 45;
	Props {
		lc: (rem % 9) as u32,
		lp: (rem / 9) as u32,
		pb,
	}
}

fn filters_for(p: Props, dict_size: u32) -> Result<Filters> {
	let mut options = LzmaOptions::new_preset(PRESET).map_err(lzma_err)?;
	options.dict_size(dict_size);
	options.literal_context_bits(p.lc);
	options.literal_position_bits(p.lp);
	options.position_bits(p.pb);

	let mut filters = Filters::new();
	filters.lzma1(&options);
	Ok(filters)
}

/// Compress `data`, writing the properties header and a little-endian unpacked length (4 bytes,
/// or 8 if `long_length` is set) ahead of the raw LZMA1 stream.
///
/// `threads` is clamped to `{1, 2}`, matching the original tool's `props.threads = threads_count >
/// 1 ? 2 : 1`. The raw LZMA1 filter encoder this crate binds to has no multithreaded path (the
/// original's threading hooks into its own SDK's block-level scheduler, which only applies to the
/// `.xz` container format, not a bare LZMA1 stream), so this only affects the value recorded in
/// logs, not the bytes produced.
#[instrument(level = "debug", skip(data))]
pub fn compress(data: &[u8], long_length: bool, threads: u32) -> Result<Vec<u8>> {
	let threads = if threads > 1 { 2 } else { 1 };
	let props = props_for(data.len());
	let filters = filters_for(props, DICT_SIZE)?;
	let mut stream = Stream::new_raw_encoder(&filters).map_err(lzma_err)?;

	let mut out = Vec::with_capacity(data.len() / 2 + PROPS_SIZE + 8);
	out.push(props_byte(props));
	out.extend_from_slice(&DICT_SIZE.to_le_bytes());
	if long_length {
		out.extend_from_slice(&(data.len() as u64).to_le_bytes());
	} else {
		out.extend_from_slice(&(data.len() as u32).to_le_bytes());
	}

	run_stream(&mut stream, data, &mut out)?;
	trace!(input = data.len(), output = out.len(), threads, "lzma compressed");
	Ok(out)
}

/// Decompress an LZMA1 stream given its 5-byte properties header and the unpacked length the
/// writer declared (used only to pre-size the output buffer).
#[instrument(level = "debug", skip(data))]
pub fn decompress(
	header: &[u8; PROPS_SIZE],
	unpacked_length: u64,
	data: &[u8],
) -> Result<Vec<u8>> {
	let props = props_from_byte(header[0]);
	let dict_size = u32::from_le_bytes(header[1..5].try_into().unwrap());

	let filters = filters_for(props, dict_size)?;
	let mut stream = Stream::new_raw_decoder(&filters).map_err(lzma_err)?;

	let mut out = Vec::with_capacity(unpacked_length.min(64 << 20) as usize);
	run_stream(&mut stream, data, &mut out)?;
	Ok(out)
}

fn run_stream(stream: &mut Stream, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
	let mut buf = [0u8; 64 * 1024];
	let mut offset = 0;

	loop {
		let eof = offset >= input.len();
		let chunk = &input[offset..];
		let before_in = stream.total_in();
		let before_out = stream.total_out();
		stream
			.process(
				chunk,
				&mut buf,
				if eof { Action::Finish } else { Action::Run },
			)
			.map_err(lzma_err)?;
		let consumed = (stream.total_in() - before_in) as usize;
		let produced = (stream.total_out() - before_out) as usize;
		offset += consumed;
		out.extend_from_slice(&buf[..produced]);

		if stream.status() == Status::StreamEnd {
			break;
		}
		if eof && consumed == 0 && produced == 0 {
			break;
		}
	}

	Ok(())
}

fn lzma_err(err: impl std::fmt::Display) -> Error {
	Error::InnerCodecFailure {
		codec: "lzma",
		reason: err.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn props_byte_roundtrip() {
		let p = Props { lc: 3, lp: 0, pb: 2 };
		let byte = props_byte(p);
		let back = props_from_byte(byte);
		assert_eq!((back.lc, back.lp, back.pb), (p.lc, p.lp, p.pb));
	}
}
