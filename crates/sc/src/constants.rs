/// Magic bytes for the outer SC container, read as a big-endian `u16`.
pub const SC_MAGIC: u16 = 0x5343;

/// Sub-magic marking an LZHAM payload inside a version-1 container, read as a little-endian `u32`.
pub const SCLZ_MAGIC: u32 = 0x5A4C_4353;

/// ASCII delimiter preceding the version-4 metadata trailer.
pub const METADATA_DELIMITER: &[u8; 5] = b"START";

/// Length in bytes of the MD5 digest the writer always emits.
pub const HASH_LENGTH: u32 = 16;

/// LZHAM dictionary size log2 the writer always emits.
pub const LZHAM_DICT_SIZE_LOG2: u8 = 18;

/// Container version discriminants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Version {
	/// LZMA (or LZHAM, if the payload starts with [`SCLZ_MAGIC`]).
	LzmaOrLzham,
	/// Zstandard.
	Zstandard,
	/// Wrapped form: the next 4 bytes are the real inner version, and the file ends with a
	/// metadata trailer.
	Wrapped,
}

impl Version {
	/// Map a raw big-endian version integer to a [`Version`], if it is one we understand.
	pub const fn from_u32(raw: u32) -> Option<Self> {
		match raw {
			1 => Some(Self::LzmaOrLzham),
			3 => Some(Self::Zstandard),
			4 => Some(Self::Wrapped),
			_ => None,
		}
	}

	/// The raw big-endian version integer for this variant.
	pub const fn to_u32(self) -> u32 {
		match self {
			Self::LzmaOrLzham => 1,
			Self::Zstandard => 3,
			Self::Wrapped => 4,
		}
	}
}

/// Which inner codec a container's payload is compressed with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Signature {
	/// LZMA.
	Lzma,
	/// LZHAM.
	Lzham,
	/// Zstandard.
	Zstandard,
}

impl Signature {
	/// The outer version this signature is written under.
	pub const fn outer_version(self) -> Version {
		match self {
			Self::Lzma | Self::Lzham => Version::LzmaOrLzham,
			Self::Zstandard => Version::Zstandard,
		}
	}
}
