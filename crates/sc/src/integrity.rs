//! Integrity hash used to cover the decompressed payload.

use md5::{Digest as _, Md5};

use crate::constants::HASH_LENGTH;

/// MD5 digest newtype.
///
/// The container format always writes a 16-byte MD5 digest of the decompressed payload, but the
/// hash length is itself a field on the wire, so a reader should not assume it is always 16.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Hash(pub Vec<u8>);

impl std::fmt::Debug for Hash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Hash").field(&hex(&self.0)).finish()
	}
}

impl std::ops::Deref for Hash {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<u8>> for Hash {
	fn from(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

impl Hash {
	/// Compute the MD5 digest of a buffer.
	pub fn of(data: &[u8]) -> Self {
		let mut hasher = Md5::new();
		hasher.update(data);
		Self(hasher.finalize().to_vec())
	}

	/// The digest length the writer always emits.
	pub const fn written_len() -> u32 {
		HASH_LENGTH
	}
}

fn hex(bytes: &[u8]) -> String {
	bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn md5_of_empty() {
		let hash = Hash::of(b"");
		assert_eq!(hex(&hash.0), "d41d8cd98f00b204e9800998ecf8427e");
	}
}
