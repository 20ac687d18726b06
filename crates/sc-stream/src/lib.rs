//! Seekable byte stream abstraction.
//!
//! This crate has one job: give the container codec a single trait to be generic over, whether
//! the underlying bytes live in a file or in memory. It is the leaf dependency of the `sc` crate,
//! in the same spirit as a low-level framing crate sitting underneath a higher-level archive
//! format: no knowledge of the container format lives here, only bytes, positions, and endianness.

#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

pub mod error;
mod file;
mod memory;

pub use file::FileStream;
pub use memory::MemoryStream;

use error::{Result, StreamError};

/// Where a seek is relative to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeekFrom {
	/// Relative to the start of the stream.
	Start(u64),
	/// Relative to the end of the stream.
	End(i64),
	/// Relative to the current position.
	Current(i64),
}

impl From<SeekFrom> for std::io::SeekFrom {
	fn from(value: SeekFrom) -> Self {
		match value {
			SeekFrom::Start(n) => std::io::SeekFrom::Start(n),
			SeekFrom::End(n) => std::io::SeekFrom::End(n),
			SeekFrom::Current(n) => std::io::SeekFrom::Current(n),
		}
	}
}

/// A bidirectional, seekable byte stream.
///
/// Implementors are responsible for tracking their own open/closed state; every method on this
/// trait other than [`is_closed`][ByteStream::is_closed] and [`close`][ByteStream::close] must
/// return [`StreamError::Closed`] once the stream has been closed. Closing is idempotent.
pub trait ByteStream {
	/// Current absolute position, in bytes from the start.
	fn position(&self) -> Result<u64>;

	/// Total length of the stream, in bytes.
	fn len(&self) -> Result<u64>;

	/// `true` if the stream has zero length.
	fn is_empty(&self) -> Result<bool> {
		Ok(self.len()? == 0)
	}

	/// Seek to a new position, returning the resulting absolute position.
	fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

	/// Read up to `dst.len()` bytes, returning the number of bytes actually read.
	///
	/// Mirrors [`std::io::Read::read`]: a short read is not necessarily an error or EOF, callers
	/// that need an exact count should loop (see [`read_exact`][ByteStream::read_exact]).
	fn read(&mut self, dst: &mut [u8]) -> Result<usize>;

	/// Read exactly `dst.len()` bytes, looping over short reads, erroring only on true EOF.
	fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
		let mut filled = 0;
		while filled < dst.len() {
			let n = self.read(&mut dst[filled..])?;
			if n == 0 {
				return Err(StreamError::Io(std::io::Error::new(
					std::io::ErrorKind::UnexpectedEof,
					"stream ended before the requested bytes were available",
				)));
			}
			filled += n;
		}
		Ok(())
	}

	/// Write all of `src`.
	fn write(&mut self, src: &[u8]) -> Result<()>;

	/// Whether the stream has been closed.
	fn is_closed(&self) -> bool;

	/// Close the stream. Idempotent.
	fn close(&mut self);

	/// A contiguous-memory view of the whole stream, if this stream is memory-backed.
	///
	/// Used only by the metadata trailer parser, which needs to walk backward from end-of-file
	/// without issuing a seek/read pair per field. File-backed streams return `None`; callers fall
	/// back to reading the last chunk of the file into a buffer instead.
	fn data(&self) -> Option<&[u8]> {
		None
	}
}

macro_rules! read_be {
	($name:ident, $ty:ty) => {
		/// Read a big-endian integer.
		fn $name(&mut self) -> Result<$ty>
		where
			Self: Sized,
		{
			let mut buf = [0u8; std::mem::size_of::<$ty>()];
			ByteStream::read_exact(self, &mut buf)?;
			Ok(<$ty>::from_be_bytes(buf))
		}
	};
}

macro_rules! read_le {
	($name:ident, $ty:ty) => {
		/// Read a little-endian integer.
		fn $name(&mut self) -> Result<$ty>
		where
			Self: Sized,
		{
			let mut buf = [0u8; std::mem::size_of::<$ty>()];
			ByteStream::read_exact(self, &mut buf)?;
			Ok(<$ty>::from_le_bytes(buf))
		}
	};
}

macro_rules! write_be {
	($name:ident, $ty:ty) => {
		/// Write a big-endian integer.
		fn $name(&mut self, value: $ty) -> Result<()>
		where
			Self: Sized,
		{
			ByteStream::write(self, &value.to_be_bytes())
		}
	};
}

macro_rules! write_le {
	($name:ident, $ty:ty) => {
		/// Write a little-endian integer.
		fn $name(&mut self, value: $ty) -> Result<()>
		where
			Self: Sized,
		{
			ByteStream::write(self, &value.to_le_bytes())
		}
	};
}

/// Endianness-tagged integer helpers, layered over [`ByteStream`].
///
/// Blanket-implemented for every `ByteStream`, the way `byteorder`'s extension traits layer over
/// `Read`/`Write`.
pub trait ByteStreamExt: ByteStream {
	/// Read a single byte.
	fn read_u8(&mut self) -> Result<u8>
	where
		Self: Sized,
	{
		let mut buf = [0u8; 1];
		ByteStream::read_exact(self, &mut buf)?;
		Ok(buf[0])
	}

	/// Write a single byte.
	fn write_u8(&mut self, value: u8) -> Result<()>
	where
		Self: Sized,
	{
		ByteStream::write(self, &[value])
	}

	read_be!(read_u16_be, u16);
	read_be!(read_u32_be, u32);
	read_be!(read_u64_be, u64);
	read_le!(read_u16_le, u16);
	read_le!(read_u32_le, u32);
	read_le!(read_u64_le, u64);

	write_be!(write_u16_be, u16);
	write_be!(write_u32_be, u32);
	write_be!(write_u64_be, u64);
	write_le!(write_u16_le, u16);
	write_le!(write_u32_le, u32);
	write_le!(write_u64_le, u64);
}

impl<T: ByteStream + ?Sized> ByteStreamExt for T {}

/// Copy every remaining byte of `input` into `output`, without buffering the whole thing.
pub fn copy<I: ByteStream + ?Sized, O: ByteStream + ?Sized>(
	input: &mut I,
	output: &mut O,
) -> Result<()> {
	let mut buf = [0u8; 64 * 1024];
	loop {
		let n = input.read(&mut buf)?;
		if n == 0 {
			break;
		}
		output.write(&buf[..n])?;
	}
	Ok(())
}

/// Read every remaining byte of `input` into a new buffer.
pub fn read_all<I: ByteStream + ?Sized>(input: &mut I) -> Result<Vec<u8>> {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 64 * 1024];
	loop {
		let n = input.read(&mut chunk)?;
		if n == 0 {
			break;
		}
		buf.extend_from_slice(&chunk[..n]);
	}
	Ok(buf)
}

/// Write the whole of `data` to `output`.
pub fn write_all<O: ByteStream + ?Sized>(output: &mut O, data: &[u8]) -> Result<()> {
	output.write(data)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_stream_endian_roundtrip() {
		let mut w = MemoryStream::new();
		w.write_u16_be(0x5343).unwrap();
		w.write_u32_le(0x0001_86A0).unwrap();
		let bytes = w.into_inner();
		assert_eq!(bytes, vec![0x53, 0x43, 0xA0, 0x86, 0x01, 0x00]);

		let mut r = MemoryStream::from_vec(bytes);
		assert_eq!(r.read_u16_be().unwrap(), 0x5343);
		assert_eq!(r.read_u32_le().unwrap(), 0x0001_86A0);
	}
}
