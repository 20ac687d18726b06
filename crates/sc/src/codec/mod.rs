//! Inner codec adapters.
//!
//! Each submodule wraps one compression backend behind a pair of whole-buffer
//! `compress`/`decompress` functions; [`crate::reader`] and [`crate::writer`] dispatch to these
//! based on the container's version and (for version 1) the presence of the LZHAM sub-magic.

pub mod lzham;
pub mod lzma;
pub mod zstd;
