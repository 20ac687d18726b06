//! Outer container header.
//!
//! The purpose of the header is to identify the file as an SC container and carry its version.
//! It is two plain big-endian fields directly at the start of the stream: no framing, no
//! alignment padding.

use deku::prelude::*;

use super::constants::SC_MAGIC;

/// SC container header: magic and version.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct Header {
	/// Magic number. Asserted to match [`SC_MAGIC`].
	#[deku(assert = "*magic == SC_MAGIC")]
	pub magic: u16,

	/// Raw version field, big-endian `u32`.
	///
	/// Use [`crate::Version::from_u32`] to interpret it.
	pub version: u32,
}

impl Header {
	/// Wire length of the header in bytes.
	pub const LENGTH: usize = 6;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn roundtrip() {
		let header = Header {
			magic: SC_MAGIC,
			version: 3,
		};
		let bytes = header.to_bytes().unwrap();
		assert_eq!(bytes, vec![0x53, 0x43, 0, 0, 0, 3]);

		let (_, decoded) = Header::from_bytes((&bytes, 0)).unwrap();
		assert_eq!(decoded, header);
	}
}
