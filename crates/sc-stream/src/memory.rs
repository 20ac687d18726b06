use crate::{
	error::{Result, StreamError},
	ByteStream, SeekFrom,
};

/// A stream backed by an in-memory byte buffer.
#[derive(Debug, Default)]
pub struct MemoryStream {
	buf: Option<Vec<u8>>,
	pos: u64,
}

impl MemoryStream {
	/// An empty, writable stream.
	pub fn new() -> Self {
		Self {
			buf: Some(Vec::new()),
			pos: 0,
		}
	}

	/// A stream over an existing buffer, positioned at the start.
	pub fn from_vec(buf: Vec<u8>) -> Self {
		Self {
			buf: Some(buf),
			pos: 0,
		}
	}

	/// Consume the stream, returning the underlying buffer.
    ///
    /// Panics if the stream has been closed.
	pub fn into_inner(self) -> Vec<u8> {
		self.buf.expect("stream was closed")
	}

	fn buf_ref(&self) -> Result<&Vec<u8>> {
		self.buf.as_ref().ok_or(StreamError::Closed)
	}

	fn buf_mut(&mut self) -> Result<&mut Vec<u8>> {
		self.buf.as_mut().ok_or(StreamError::Closed)
	}
}

impl ByteStream for MemoryStream {
	fn position(&self) -> Result<u64> {
		if self.buf.is_none() {
			return Err(StreamError::Closed);
		}
		Ok(self.pos)
	}

	fn len(&self) -> Result<u64> {
		Ok(self.buf_ref()?.len() as u64)
	}

	fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
		let len = self.len()? as i64;
		let target = match pos {
			SeekFrom::Start(n) => n as i64,
			SeekFrom::End(n) => len + n,
			SeekFrom::Current(n) => self.pos as i64 + n,
		};
		if target < 0 || target > len {
			return Err(StreamError::OutOfBounds {
				offset: target,
				length: len as u64,
			});
		}
		self.pos = target as u64;
		Ok(self.pos)
	}

	fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
		let pos = self.pos as usize;
		let buf = self.buf_ref()?;
		let available = buf.len().saturating_sub(pos);
		let n = dst.len().min(available);
		dst[..n].copy_from_slice(&buf[pos..pos + n]);
		self.pos += n as u64;
		Ok(n)
	}

	fn write(&mut self, src: &[u8]) -> Result<()> {
		let pos = self.pos as usize;
		let buf = self.buf_mut()?;
		if pos > buf.len() {
			buf.resize(pos, 0);
		}
		let end = pos + src.len();
		if end > buf.len() {
			buf.resize(end, 0);
		}
		buf[pos..end].copy_from_slice(src);
		self.pos = end as u64;
		Ok(())
	}

	fn is_closed(&self) -> bool {
		self.buf.is_none()
	}

	fn close(&mut self) {
		self.buf = None;
	}

	fn data(&self) -> Option<&[u8]> {
		self.buf.as_deref()
	}
}
