//! Texture container wrappers for the `sc` asset-container ecosystem.
//!
//! This crate handles only container framing for two texture formats: Khronos KTX 1.1 (the
//! default wrapper) and a raw ASTC block stream (the default pixel codec inside it). Neither the
//! KTX key/value extensions nor the ASTC encode/decode math live here; this crate moves bytes, it
//! does not interpret them.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]

pub mod astc;
pub mod error;
pub mod ktx;

pub use astc::AstcImage;
pub use error::Error;
pub use ktx::Texture as KtxTexture;
