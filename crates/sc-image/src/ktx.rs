//! Khronos KTX 1.1 texture container.
//!
//! This only handles the container framing: a fixed 64-byte header followed by one `{length,
//! data}` record per mipmap level. Pixel data is passed through untouched; block-compression
//! formats (ASTC in particular) are wrapped separately in [`crate::astc`].

use deku::prelude::*;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Standard 12-byte KTX file identifier.
pub const IDENTIFIER: [u8; 12] = [
	0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Reference endianness value for a file written in the reader's native byte order.
pub const ENDIAN_REFERENCE: u32 = 0x0403_0201;

/// Fixed 64-byte KTX header, following the 12-byte identifier.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Header {
	/// Always [`ENDIAN_REFERENCE`] for files this crate writes.
	pub endianness: u32,
	/// OpenGL type of the image data (0 for compressed formats).
	pub gl_type: u32,
	/// Size in bytes of one `gl_type` component (0 for compressed formats).
	pub gl_type_size: u32,
	/// OpenGL format (0 for compressed formats).
	pub gl_format: u32,
	/// OpenGL internal format, e.g. an ASTC `COMPRESSED_RGBA_ASTC_*` token.
	pub gl_internal_format: u32,
	/// OpenGL base internal format.
	pub gl_base_internal_format: u32,
	/// Texture width in pixels.
	pub pixel_width: u32,
	/// Texture height in pixels.
	pub pixel_height: u32,
	/// Texture depth; always 0 for 2D textures.
	pub pixel_depth: u32,
	/// Always 0: this crate does not write texture arrays.
	pub number_of_array_elements: u32,
	/// Always 1: this crate does not write cubemaps.
	pub number_of_faces: u32,
	/// Number of mipmap levels that follow the header.
	pub number_of_mipmap_levels: u32,
	/// Always 0: this crate does not write key/value metadata.
	pub bytes_of_key_value_data: u32,
}

/// A complete in-memory KTX texture: the header plus one pixel buffer per mip level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Texture {
	/// The parsed fixed header.
	pub header: Header,
	/// Raw bytes for each mipmap level, level 0 first.
	pub levels: Vec<Vec<u8>>,
}

impl Texture {
	/// Build a single-level, uncompressed-framing texture description.
	///
	/// `gl_internal_format`/`gl_base_internal_format` are the caller's responsibility: this crate
	/// does not know the OpenGL token table, only the container shape.
	pub fn new(
		width: u32,
		height: u32,
		gl_internal_format: u32,
		gl_base_internal_format: u32,
		levels: Vec<Vec<u8>>,
	) -> Self {
		Self {
			header: Header {
				endianness: ENDIAN_REFERENCE,
				gl_type: 0,
				gl_type_size: 1,
				gl_format: 0,
				gl_internal_format,
				gl_base_internal_format,
				pixel_width: width,
				pixel_height: height,
				pixel_depth: 0,
				number_of_array_elements: 0,
				number_of_faces: 1,
				number_of_mipmap_levels: levels.len() as u32,
				bytes_of_key_value_data: 0,
			},
			levels,
		}
	}

	/// Serialise to the KTX wire format.
	#[instrument(level = "debug", skip(self))]
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		out.extend_from_slice(&IDENTIFIER);
		out.extend_from_slice(
			&self
				.header
				.to_bytes()
				.map_err(|e| Error::InvalidParameters(e.to_string()))?,
		);

		for level in &self.levels {
			out.extend_from_slice(&(level.len() as u32).to_le_bytes());
			out.extend_from_slice(level);
			let padding = (4 - (level.len() % 4)) % 4;
			out.extend(std::iter::repeat(0u8).take(padding));
		}

		debug!(levels = self.levels.len(), bytes = out.len(), "serialised KTX texture");
		Ok(out)
	}

	/// Parse a KTX texture from its wire bytes.
	#[instrument(level = "debug", skip(bytes))]
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < IDENTIFIER.len() || bytes[..IDENTIFIER.len()] != IDENTIFIER {
			return Err(Error::BadKtxIdentifier);
		}
		let rest = &bytes[IDENTIFIER.len()..];
		let (tail, header) =
			Header::from_bytes((rest, 0)).map_err(|_| Error::Truncated)?;

		if header.endianness != ENDIAN_REFERENCE {
			return Err(Error::BadEndianness(header.endianness));
		}

		let mut cursor = tail.0;
		cursor = cursor
			.get(header.bytes_of_key_value_data as usize..)
			.ok_or(Error::Truncated)?;

		if header.number_of_mipmap_levels as usize > cursor.len() {
			return Err(Error::Truncated);
		}
		let mut levels = Vec::with_capacity(header.number_of_mipmap_levels as usize);
		for _ in 0..header.number_of_mipmap_levels {
			if cursor.len() < 4 {
				return Err(Error::Truncated);
			}
			let (len_bytes, rest) = cursor.split_at(4);
			let len = u32::from_le_bytes(len_bytes.try_into().unwrap()) as usize;
			if rest.len() < len {
				return Err(Error::Truncated);
			}
			let (data, rest) = rest.split_at(len);
			levels.push(data.to_vec());

			let padding = (4 - (len % 4)) % 4;
			cursor = rest.get(padding..).ok_or(Error::Truncated)?;
		}

		debug!(levels = levels.len(), "parsed KTX texture");
		Ok(Self { header, levels })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn roundtrip_single_level() {
		let texture = Texture::new(4, 4, 0x93B0, 0x1908, vec![vec![0xAAu8; 16]]);
		let bytes = texture.to_bytes().unwrap();
		let parsed = Texture::from_bytes(&bytes).unwrap();
		assert_eq!(parsed, texture);
	}

	#[test]
	fn rejects_bad_identifier() {
		let err = Texture::from_bytes(&[0u8; 16]).unwrap_err();
		assert!(matches!(err, Error::BadKtxIdentifier));
	}
}
