//! ASTC block-stream container.
//!
//! Wraps raw ASTC-compressed blocks with the small header the original tooling writes ahead of
//! them: a file identifier, the block footprint, and 24-bit little-endian dimensions. Block
//! encoding/decoding itself is out of scope; this module only frames and unframes the blob.

use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// 4-byte ASTC container identifier.
pub const IDENTIFIER: [u8; 4] = [0x13, 0xAB, 0xA1, 0x5C];

/// An ASTC block-compressed image: dimensions, block footprint, and raw block bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AstcImage {
	/// Block width, in texels.
	pub blocks_x: u8,
	/// Block height, in texels.
	pub blocks_y: u8,
	/// Image width, in texels.
	pub width: u32,
	/// Image height, in texels.
	pub height: u32,
	/// Raw compressed block data, 16 bytes per block, row-major.
	pub blocks: Vec<u8>,
}

impl AstcImage {
	/// Number of blocks along each axis for this image's footprint.
	pub fn block_grid(&self) -> (u32, u32) {
		let x = (self.width + self.blocks_x as u32 - 1) / self.blocks_x as u32;
		let y = (self.height + self.blocks_y as u32 - 1) / self.blocks_y as u32;
		(x, y)
	}

	/// Serialise to the wire format.
	#[instrument(level = "debug", skip(self))]
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(IDENTIFIER.len() + 3 + 9 + self.blocks.len());
		out.extend_from_slice(&IDENTIFIER);
		out.push(self.blocks_x);
		out.push(self.blocks_y);
		out.push(1); // z blocks, always 1 for 2D images

		write_u24_le(&mut out, self.width);
		write_u24_le(&mut out, self.height);
		write_u24_le(&mut out, 1); // z dimension, always 1 for 2D images

		out.extend_from_slice(&self.blocks);
		debug!(bytes = out.len(), "serialised ASTC image");
		out
	}

	/// Parse from the wire format.
	#[instrument(level = "debug", skip(bytes))]
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < IDENTIFIER.len() || bytes[..IDENTIFIER.len()] != IDENTIFIER {
			return Err(Error::BadAstcIdentifier);
		}
		let mut cursor = &bytes[IDENTIFIER.len()..];

		let (header, rest) = split(cursor, 3)?;
		let blocks_x = header[0];
		let blocks_y = header[1];
		cursor = rest;

		let (w, rest) = split(cursor, 3)?;
		let width = read_u24_le(w);
		cursor = rest;

		let (h, rest) = split(cursor, 3)?;
		let height = read_u24_le(h);
		cursor = rest;

		let (_z, rest) = split(cursor, 3)?;
		cursor = rest;

		Ok(Self {
			blocks_x,
			blocks_y,
			width,
			height,
			blocks: cursor.to_vec(),
		})
	}
}

fn split(buf: &[u8], n: usize) -> Result<(&[u8], &[u8])> {
	if buf.len() < n {
		return Err(Error::Truncated);
	}
	Ok(buf.split_at(n))
}

fn write_u24_le(out: &mut Vec<u8>, value: u32) {
	out.extend_from_slice(&value.to_le_bytes()[..3]);
}

fn read_u24_le(bytes: &[u8]) -> u32 {
	u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn roundtrip() {
		let image = AstcImage {
			blocks_x: 4,
			blocks_y: 4,
			width: 8,
			height: 8,
			blocks: vec![0u8; 16 * 4], // 2x2 blocks of 4x4 texels over an 8x8 image
		};
		let bytes = image.to_bytes();
		let parsed = AstcImage::from_bytes(&bytes).unwrap();
		assert_eq!(parsed, image);
		assert_eq!(parsed.block_grid(), (2, 2));
	}

	#[test]
	fn rejects_bad_identifier() {
		let err = AstcImage::from_bytes(&[0u8; 16]).unwrap_err();
		assert!(matches!(err, Error::BadAstcIdentifier));
	}
}
