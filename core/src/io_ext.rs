use std::io::{
	Error,
	ErrorKind,
	Read,
	Result
};

pub trait ReadBinExt: Read {
	/// Reads a 4-byte tag, such as a file magic
	#[inline]
	fn read_tag4(&mut self) -> Result<[u8; 4]> {
		let mut tag = [0; 4];
		self.read_exact(&mut tag)?;
		Ok(tag)
	}

	/// Reads exactly `len` bytes.
	/// The buffer grows with the data actually read, so a bogus length from a corrupt
	/// header fails with [`ErrorKind::UnexpectedEof`] instead of allocating it up front.
	#[inline]
	fn read_block(&mut self, len: u64) -> Result<Vec<u8>> {
		let mut data = vec![];
		Read::take(self, len).read_to_end(&mut data)?;

		if (data.len() as u64) < len {
			return Err(Error::new(ErrorKind::UnexpectedEof,
				format!("expected {} bytes, got {}", len, data.len())));
		}

		Ok(data)
	}
}

impl<R> ReadBinExt for R
where
	R: Read + ?Sized,
{
}

#[cfg(test)]
mod tests {
	use std::io::ErrorKind;

	use super::*;

	#[test]
	fn test_read_tag4() {
		let mut data = &b"MAT \x32\x00"[..];
		assert_eq!(*b"MAT ", data.read_tag4().unwrap());
		assert_eq!(data, &b"\x32\x00"[..]);
	}

	#[test]
	fn test_read_block() {
		let mut data = &[1u8, 2, 3, 4, 5][..];
		assert_eq!(vec![1, 2, 3], data.read_block(3).unwrap());
		assert_eq!(vec![4, 5], data.read_block(2).unwrap());
		assert!(data.read_block(0).unwrap().is_empty());
	}

	#[test]
	fn test_read_block_truncated() {
		let mut data = &[1u8, 2][..];
		let err = data.read_block(u32::MAX as u64).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
	}
}
