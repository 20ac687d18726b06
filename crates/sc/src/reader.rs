//! Top-level container decompression.

use deku::prelude::*;
use sc_stream::{ByteStream, ByteStreamExt, SeekFrom};
use tracing::{debug, instrument};

use crate::{
	codec,
	constants::{Signature, Version, SCLZ_MAGIC},
	error::{Error, Result},
	header::Header,
	integrity::Hash,
	trailer::{self, MetadataAsset},
};

/// Outcome of decompressing a container: the asset records recovered from its metadata trailer
/// (if any), and the raw hash bytes recorded in its header (if any).
///
/// The reader never compares this hash against the decompressed bytes itself; pass both to
/// [`verify_hash`] if the caller wants that check performed.
#[derive(Clone, Debug, Default)]
pub struct Decompressed {
	/// Asset records recovered from the version-4 metadata trailer, if requested and present.
	pub metadata: Vec<MetadataAsset>,
	/// Raw hash bytes recorded in the container header. Empty if the container carries none.
	pub hash: Vec<u8>,
}

/// Decompress an SC container from `input` into `output`.
///
/// Returns the asset records recovered from the version-4 metadata trailer, if `with_metadata` is
/// set and the container has one; otherwise returns an empty list without attempting to parse it.
/// Does not verify the container's recorded hash against the decompressed bytes; call
/// [`verify_hash`] afterward if that check is wanted.
#[instrument(level = "debug", skip(input, output))]
pub fn decompress<I: ByteStream, O: ByteStream>(
	input: &mut I,
	output: &mut O,
	with_metadata: bool,
) -> Result<Decompressed> {
	let total_len = input.len()?;

	let mut header_bytes = [0u8; Header::LENGTH];
	input.read_exact(&mut header_bytes)?;
	let found_magic = u16::from_be_bytes([header_bytes[0], header_bytes[1]]);
	if found_magic != crate::SC_MAGIC {
		return Err(Error::BadMagic { found: found_magic });
	}
	let (_, header) =
		Header::from_bytes((&header_bytes, 0)).map_err(|_| Error::BadMagic { found: found_magic })?;

	let mut trailer_len: u64 = 0;
	let mut metadata = Vec::new();

	let mut version =
		Version::from_u32(header.version).ok_or(Error::UnsupportedVersion(header.version))?;

	if matches!(version, Version::Wrapped) {
		let raw_inner = input.read_u32_be()?;
		version = Version::from_u32(raw_inner).ok_or(Error::UnsupportedVersion(raw_inner))?;
		if matches!(version, Version::Wrapped) {
			return Err(Error::UnsupportedVersion(raw_inner));
		}

		let whole = read_whole(input)?;
		let chunk = trailer::chunk_length(&whole)?;
		trailer_len = chunk + trailer::TRAILER_FRAMING_LENGTH;

		if with_metadata {
			metadata = trailer::parse_metadata(&whole)?;
		}
	}

	let hash_length = input.read_u32_be()?;
	let mut hash = vec![0u8; hash_length as usize];
	input.read_exact(&mut hash)?;

	let payload_start = input.position()?;
	let payload_len = total_len
		.checked_sub(payload_start)
		.and_then(|n| n.checked_sub(trailer_len))
		.ok_or(Error::Truncated)?;

	let mut payload = vec![0u8; payload_len as usize];
	input.read_exact(&mut payload)?;

	let decoded = decode_payload(version, &payload)?;

	output.write(&decoded)?;
	debug!(bytes = decoded.len(), assets = metadata.len(), "decompressed container");
	Ok(Decompressed { metadata, hash })
}

/// Verify that `decoded` hashes to `hash` (the bytes recorded in a container's header, e.g. from
/// [`Decompressed::hash`]).
///
/// Not called by [`decompress`] itself: per the format, hash verification is the caller's choice,
/// not a mandatory step of decoding. An empty `hash` (a container with no recorded hash) always
/// verifies successfully.
pub fn verify_hash(decoded: &[u8], hash: &[u8]) -> Result<()> {
	if hash.is_empty() {
		return Ok(());
	}
	if *Hash::of(decoded) != hash[..] {
		return Err(Error::HashMismatch);
	}
	Ok(())
}

fn decode_payload(version: Version, payload: &[u8]) -> Result<Vec<u8>> {
	match version {
		Version::Zstandard => codec::zstd::decompress(payload),
		Version::LzmaOrLzham => {
			if payload.len() >= 4
				&& u32::from_le_bytes(payload[0..4].try_into().unwrap()) == SCLZ_MAGIC
			{
				codec::lzham::decompress(&payload[4..])
			} else {
				if payload.len() < codec::lzma::PROPS_SIZE + 4 {
					return Err(Error::Truncated);
				}
				let header: [u8; codec::lzma::PROPS_SIZE] =
					payload[0..codec::lzma::PROPS_SIZE].try_into().unwrap();
				let unpacked_length = u32::from_le_bytes(
					payload[codec::lzma::PROPS_SIZE..codec::lzma::PROPS_SIZE + 4]
						.try_into()
						.unwrap(),
				) as u64;
				codec::lzma::decompress(
					&header,
					unpacked_length,
					&payload[codec::lzma::PROPS_SIZE + 4..],
				)
			}
		}
		Version::Wrapped => unreachable!("inner version is resolved before decode_payload"),
	}
}

/// Which inner codec a decompressed container used.
pub fn signature_of(version: Version, payload_head: &[u8]) -> Option<Signature> {
	match version {
		Version::Zstandard => Some(Signature::Zstandard),
		Version::LzmaOrLzham => {
			if payload_head.len() >= 4
				&& u32::from_le_bytes(payload_head[0..4].try_into().unwrap()) == SCLZ_MAGIC
			{
				Some(Signature::Lzham)
			} else {
				Some(Signature::Lzma)
			}
		}
		Version::Wrapped => None,
	}
}

/// Read the entire contents of a stream into memory, restoring the original position afterward.
///
/// The metadata trailer is anchored at end-of-file and chained with backward pointers, so parsing
/// it needs a contiguous view of the whole file; this is the same whole-buffer assumption the
/// original implementation makes by mapping the file into memory up front.
pub(crate) fn read_whole<S: ByteStream>(input: &mut S) -> Result<Vec<u8>> {
	if let Some(data) = input.data() {
		return Ok(data.to_vec());
	}

	let pos = input.position()?;
	input.seek(SeekFrom::Start(0))?;
	let len = input.len()?;
	let mut buf = vec![0u8; len as usize];
	input.read_exact(&mut buf)?;
	input.seek(SeekFrom::Start(pos))?;
	Ok(buf)
}

#[cfg(test)]
mod tests {
	use sc_stream::MemoryStream;

	use super::*;
	use crate::{options::CompressOptions, writer};

	fn roundtrip(signature: Signature, write_assets: bool) {
		let payload = b"the quick brown fox jumps over the lazy dog".repeat(50);

		let mut input = MemoryStream::from_vec(payload.clone());
		let mut container = MemoryStream::new();
		let options = CompressOptions {
			signature,
			write_assets,
			threads: 1,
			lzma_long_unpacked_length: false,
		};
		writer::compress(&mut input, &mut container, &options).unwrap();

		let mut container = MemoryStream::from_vec(container.into_inner());
		let mut output = MemoryStream::new();
		let result = decompress(&mut container, &mut output, true).unwrap();

		let decoded = output.into_inner();
		verify_hash(&decoded, &result.hash).unwrap();
		assert_eq!(decoded, payload);
		assert!(result.metadata.is_empty());
	}

	#[test]
	fn zstandard_roundtrip() {
		roundtrip(Signature::Zstandard, false);
	}

	#[test]
	fn lzma_roundtrip() {
		roundtrip(Signature::Lzma, false);
	}

	#[test]
	fn zstandard_with_placeholder_trailer() {
		roundtrip(Signature::Zstandard, true);
	}

	#[test]
	fn bad_magic_is_rejected() {
		let mut input = MemoryStream::from_vec(vec![0, 0, 0, 0, 0, 0]);
		let mut output = MemoryStream::new();
		let err = decompress(&mut input, &mut output, false).unwrap_err();
		assert!(matches!(err, Error::BadMagic { .. }));
	}
}
