//! SC: Supercell's generic asset-container codec.
//!
//! An SC container wraps a single blob behind a tiny framing header (magic, version, an MD5 hash
//! of the decompressed payload) around one of three inner codecs (Zstandard, LZMA, or LZHAM), and
//! optionally an end-of-file metadata trailer recording per-asset names and hashes for bundles
//! that pack more than one asset into the same blob.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::constants::*;

mod constants;

pub mod codec;
pub mod error;
pub mod header;
pub mod integrity;
pub mod options;
pub mod reader;
pub mod trailer;
pub mod writer;

pub use error::Error;
pub use options::CompressOptions;
pub use reader::{decompress, verify_hash, Decompressed};
pub use writer::compress;
