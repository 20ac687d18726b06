//! Version-4 metadata trailer.
//!
//! This is the optional last part of an SC container, written when the compressor is asked to
//! record asset names and per-asset hashes alongside the payload. Unlike [the header][super::header],
//! which is read forward from the start of the file, the trailer is a chain of offsets anchored at
//! end-of-file and walked *backward*: every pointer in it is "N bytes before the previous pointer",
//! so there is no way to parse it without first knowing where the file ends.
//!
//! The shape of the chain (and the field widths along it) is controlled by a single
//! `metadata_flags` byte six bytes from the end, which is only meaningful if
//! `metadata_flags & 0xFC == 0x24`; any other value means there is no metadata here at all.
//! From there, a chain of `asset_info`/`strings`/`hash` backward-pointers recovers, for each asset
//! slot, an optional name and an optional hash, with field widths of 1, 2, 4, or 8 bytes depending
//! on how large the offsets need to be.
//!
//! All of the integers embedded in this chain are little-endian, unlike the outer container
//! framing (which is big-endian throughout); this is a quirk of the structure being a direct
//! memory-layout dump in the original implementation rather than a designed wire format.

use crate::error::{Error, Result};

/// One asset record recovered from the metadata trailer.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct MetadataAsset {
	/// The asset's name, if the trailer had a string slot for it.
	pub name: Option<String>,
	/// The asset's hash, if the trailer had a valid hash slot for it.
	pub hash: Option<Vec<u8>>,
}

/// A bounds-checked cursor over a byte slice, addressed by signed byte offset from the start of
/// the slice, so that the backward-pointer arithmetic below can be written the way the original
/// pointer arithmetic reads, without ever dereferencing out of bounds.
struct BackCursor<'a> {
	buf: &'a [u8],
}

impl<'a> BackCursor<'a> {
	fn new(buf: &'a [u8]) -> Self {
		Self { buf }
	}

	fn end(&self) -> isize {
		self.buf.len() as isize
	}

	fn bytes(&self, at: isize, len: usize) -> Result<&'a [u8]> {
		if at < 0 {
			return Err(malformed("negative offset"));
		}
		let start = at as usize;
		let stop = start
			.checked_add(len)
			.ok_or_else(|| malformed("offset overflow"))?;
		self.buf
			.get(start..stop)
			.ok_or_else(|| malformed("offset out of bounds"))
	}

	fn u8(&self, at: isize) -> Result<u8> {
		Ok(self.bytes(at, 1)?[0])
	}

	fn u16(&self, at: isize) -> Result<u16> {
		Ok(u16::from_le_bytes(self.bytes(at, 2)?.try_into().unwrap()))
	}

	fn u32(&self, at: isize) -> Result<u32> {
		Ok(u32::from_le_bytes(self.bytes(at, 4)?.try_into().unwrap()))
	}

	/// Read a NUL-terminated string starting at `at`.
	fn c_string(&self, at: isize) -> Result<String> {
		if at < 0 {
			return Err(malformed("negative string offset"));
		}
		let start = at as usize;
		let rest = self
			.buf
			.get(start..)
			.ok_or_else(|| malformed("string offset out of bounds"))?;
		let nul = rest
			.iter()
			.position(|&b| b == 0)
			.ok_or_else(|| malformed("unterminated string"))?;
		Ok(String::from_utf8_lossy(&rest[..nul]).into_owned())
	}
}

fn malformed(why: &str) -> Error {
	Error::TrailerMalformed(why.to_string())
}

/// Number of bytes of fixed-width framing around the metadata blob itself: the big-endian
/// `chunk_length` field (4 bytes) and the `"START"` delimiter preceding it (5 bytes).
pub const TRAILER_FRAMING_LENGTH: u64 = 4 + 5;

/// Read the `chunk_length` field from the last 4 bytes of a version-4 container, giving the size
/// in bytes of the metadata blob (not counting the framing around it).
pub fn chunk_length(buf: &[u8]) -> Result<u64> {
	let tail = buf
		.len()
		.checked_sub(4)
		.ok_or(Error::Truncated)?;
	let bytes: [u8; 4] = buf[tail..].try_into().unwrap();
	Ok(u32::from_be_bytes(bytes) as u64)
}

/// Parse the metadata trailer out of the tail of a version-4 container.
///
/// `buf` must end exactly where the container file ends; the trailer is walked backward from
/// `buf.len()`, so any trailing bytes belonging to something else will corrupt the parse.
///
/// Returns an empty list if `metadata_flags` doesn't mark a metadata chain as present: this
/// matches the writer's placeholder trailer, which reserves the framing but records no assets.
pub fn parse_metadata(buf: &[u8]) -> Result<Vec<MetadataAsset>> {
	let cur = BackCursor::new(buf);
	let buffer_end = cur.end();
	if buffer_end < 6 {
		return Err(Error::Truncated);
	}
	let metadata_header = buffer_end - 6;

	let metadata_flags = cur.u8(metadata_header)?;
	if metadata_flags & 0xFC != 0x24 {
		return Ok(Vec::new());
	}

	let strings_bits_offset = (metadata_flags & 3) as u32;
	let info_field_size: u32 = 1 << strings_bits_offset;

	let asset_info_field_size = cur.u8(metadata_header + 1)?;
	let asset_info_offset_ptr = metadata_header - asset_info_field_size as isize;
	let asset_info_offset: u32 = if asset_info_field_size > 3 {
		cur.u32(asset_info_offset_ptr)?
	} else if asset_info_field_size <= 1 {
		cur.u8(asset_info_offset_ptr)? as u32
	} else {
		cur.u16(asset_info_offset_ptr)? as u32
	};
	let asset_info_ptr = asset_info_offset_ptr - asset_info_offset as isize;

	let hash_info_field_size: u32;
	let strings_info_field_size: u32;
	let strings_ptr: isize;
	let asset_total_count: u32;
	let unknown_bool: bool;

	if info_field_size >= 3 {
		let strings_data_offset: i32 = (-3i32).wrapping_shl(strings_bits_offset);

		if info_field_size >= 8 {
			let string_data_ptr = asset_info_ptr + strings_data_offset as isize;
			hash_info_field_size = 8;
			let delta = cur.u32(string_data_ptr)?;
			strings_ptr = string_data_ptr - delta as isize;
			strings_info_field_size = cur.u8(string_data_ptr + info_field_size as isize)? as u32;
		} else {
			hash_info_field_size = info_field_size;
			let strings_data_ptr = asset_info_ptr + strings_data_offset as isize;
			strings_info_field_size = cur.u32(strings_data_ptr + info_field_size as isize)?;
			let strings_array_offset = cur.u32(strings_data_ptr)?;
			strings_ptr = strings_data_ptr - strings_array_offset as isize;
		}

		asset_total_count = cur.u32(asset_info_ptr - info_field_size as isize)?;
		unknown_bool = false;
	} else if info_field_size > 1 {
		hash_info_field_size = info_field_size;
		let bit_offset: i32 = (-3i32).wrapping_shl(strings_bits_offset);
		let strings_array_data_offset = asset_info_ptr + bit_offset as isize;
		let back = cur.u16(strings_array_data_offset)?;
		strings_ptr = strings_array_data_offset - back as isize;
		strings_info_field_size =
			cur.u16(strings_array_data_offset + info_field_size as isize)? as u32;
		asset_total_count = cur.u16(asset_info_ptr - info_field_size as isize)? as u32;
		unknown_bool = true;
	} else {
		// info_field_size == 1: the original reads asset_info_ptr[-2] into
		// strings_info_field_size here, but immediately overwrites it below, so that read is
		// skipped entirely.
		let back = cur.u8(asset_info_ptr - 3)?;
		strings_ptr = asset_info_ptr - 3 - back as isize;
		asset_total_count = cur.u8(asset_info_ptr - info_field_size as isize)? as u32;
		strings_info_field_size = 1;
		hash_info_field_size = 1;
	}

	if asset_total_count == 0 {
		return Ok(Vec::new());
	}
	if asset_total_count as usize > buf.len() {
		return Err(Error::AllocationFailure(format!(
			"asset_total_count {asset_total_count} exceeds trailer buffer length {}",
			buf.len()
		)));
	}

	let strings_total_count: u32 = if strings_info_field_size > 3 {
		cur.u32(strings_ptr - strings_info_field_size as isize)?
	} else if strings_info_field_size > 1 {
		cur.u16(strings_ptr - strings_info_field_size as isize)? as u32
	} else {
		cur.u8(strings_ptr - strings_info_field_size as isize)? as u32
	};

	let hash_total_count: u32 = if unknown_bool {
		if hash_info_field_size > 1 {
			cur.u16(asset_info_ptr - info_field_size as isize)? as u32
		} else {
			cur.u8(asset_info_ptr - info_field_size as isize)? as u32
		}
	} else {
		cur.u32(asset_info_ptr - info_field_size as isize)?
	};

	let hash_flags_ptr = asset_info_ptr + (hash_total_count as isize * info_field_size as isize);

	let mut assets = Vec::with_capacity(asset_total_count as usize);
	for i in 0..asset_total_count {
		let mut asset = MetadataAsset::default();

		if strings_total_count > i {
			let string_offset_ptr = strings_ptr + (i as isize * strings_info_field_size as isize);
			let string_offset: isize = if strings_info_field_size > 3 {
				cur.u32(string_offset_ptr)? as isize
			} else if strings_info_field_size <= 1 {
				cur.u8(string_offset_ptr)? as isize
			} else {
				cur.u16(string_offset_ptr)? as isize
			};
			asset.name = Some(cur.c_string(string_offset_ptr - string_offset)?);
		}

		if hash_total_count > i {
			let hash_flag = cur.u8(hash_flags_ptr + i as isize)?;
			let is_valid_hash = (hash_flag >> 2) == 0x19 || (hash_flag >> 2) == 5;
			if is_valid_hash {
				let hash_offset_ptr = asset_info_ptr + (i as isize * info_field_size as isize);
				let hash_offset: isize = if hash_info_field_size > 3 {
					cur.u32(hash_offset_ptr)? as isize
				} else if hash_info_field_size <= 1 {
					cur.u8(hash_offset_ptr)? as isize
				} else {
					cur.u16(hash_offset_ptr)? as isize
				};

				let hash_length_field_size: u32 = 1 << (hash_flag & 3);
				let hash_ptr = hash_offset_ptr - hash_offset;
				let hash_size: u32 = if hash_length_field_size > 3 {
					cur.u32(hash_ptr - hash_length_field_size as isize)?
				} else if hash_length_field_size > 1 {
					cur.u16(hash_ptr - hash_length_field_size as isize)? as u32
				} else {
					cur.u8(hash_ptr - hash_length_field_size as isize)? as u32
				};

				asset.hash = Some(cur.bytes(hash_ptr, hash_size as usize)?.to_vec());
			}
		}

		assets.push(asset);
	}

	Ok(assets)
}

/// Build the placeholder trailer the writer emits when asset recording is requested.
///
/// Mirrors the upstream writer, which reserves the trailer's framing (delimiter, flags byte,
/// field-size byte) but does not yet populate the asset chain; readers see `metadata_flags == 0`,
/// which fails the `& 0xFC == 0x24` check and correctly report zero assets.
pub fn write_placeholder_trailer(out: &mut Vec<u8>) {
	out.extend_from_slice(crate::METADATA_DELIMITER);
	let blob = [0u8, 0u8]; // metadata_flags, asset_info_field_size
	out.extend_from_slice(&blob);
	out.extend_from_slice(&(blob.len() as u32).to_be_bytes());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn placeholder_trailer_parses_as_empty() {
		let mut buf = vec![0xAAu8; 8];
		write_placeholder_trailer(&mut buf);
		let assets = parse_metadata(&buf).unwrap();
		assert!(assets.is_empty());
	}

	#[test]
	fn chunk_length_reads_big_endian_tail() {
		let mut buf = vec![0u8; 4];
		buf.extend_from_slice(&42u32.to_be_bytes());
		assert_eq!(chunk_length(&buf).unwrap(), 42);
	}
}
