use std::{
	fs::File,
	io::{Read as _, Seek as _, Write as _},
	path::Path,
};

use tracing::{debug, instrument};

use crate::{
	error::{Result, StreamError},
	ByteStream,
};

/// A stream backed by an on-disk file.
#[derive(Debug)]
pub struct FileStream {
	file: Option<File>,
	len: u64,
}

impl FileStream {
	/// Open an existing file for reading and writing.
	#[instrument(level = "debug")]
	pub fn open(path: &Path) -> Result<Self> {
		let file = File::options().read(true).write(true).open(path)?;
		let len = file.metadata()?.len();
		debug!(%len, "opened file stream");
		Ok(Self {
			file: Some(file),
			len,
		})
	}

	/// Open a file for reading only.
	#[instrument(level = "debug")]
	pub fn open_read(path: &Path) -> Result<Self> {
		let file = File::open(path)?;
		let len = file.metadata()?.len();
		debug!(%len, "opened read-only file stream");
		Ok(Self {
			file: Some(file),
			len,
		})
	}

	/// Create (or truncate) a file for writing.
	#[instrument(level = "debug")]
	pub fn create(path: &Path) -> Result<Self> {
		let file = File::create(path)?;
		debug!("created file stream");
		Ok(Self {
			file: Some(file),
			len: 0,
		})
	}

	fn file_mut(&mut self) -> Result<&mut File> {
		self.file.as_mut().ok_or(StreamError::Closed)
	}

	fn file_ref(&self) -> Result<&File> {
		self.file.as_ref().ok_or(StreamError::Closed)
	}
}

impl ByteStream for FileStream {
	fn position(&self) -> Result<u64> {
		// stream_position() needs &mut, so track separately would be ideal, but File does not
		// expose a cheap position query; callers that need this hot should prefer MemoryStream.
		let mut file = self.file_ref()?.try_clone()?;
		Ok(file.stream_position()?)
	}

	fn len(&self) -> Result<u64> {
		if self.file.is_none() {
			return Err(StreamError::Closed);
		}
		Ok(self.len)
	}

	fn seek(&mut self, pos: crate::SeekFrom) -> Result<u64> {
		let file = self.file_mut()?;
		Ok(file.seek(pos.into())?)
	}

	fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
		let file = self.file_mut()?;
		Ok(file.read(dst)?)
	}

	fn write(&mut self, src: &[u8]) -> Result<()> {
		let len_before = self.len;
		let pos = {
			let file = self.file_mut()?;
			file.write_all(src)?;
			file.stream_position()?
		};
		if pos > len_before {
			self.len = pos;
		}
		Ok(())
	}

	fn is_closed(&self) -> bool {
		self.file.is_none()
	}

	fn close(&mut self) {
		self.file = None;
	}
}
