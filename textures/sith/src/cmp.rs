use byteorder::{
	LE,
	ReadBytesExt
};

use std::{
	fs::File,
	io::{
		self,
		BufReader
	},
	path::Path
};

use thiserror::Error;

use rgk_core::{
	io_ext::ReadBinExt,
	texture::Color
};

pub const MAGIC: [u8; 4] = *b"CMP ";

/// Grim Fandango (0x14) and Jedi Knight, Mysteries of the Sith, DroidWorks (0x1E)
pub const SUPPORTED_VERSIONS: [i32; 2] = [0x14, 0x1E];

pub const PALETTE_SIZE: usize = 256;

const RESERVED_SIZE: usize = 52;

#[cfg(feature = "import")]
#[derive(Debug, Error)]
pub enum CmpImportError {
	#[error("I/O error")]
	IO {
		#[source]
		source: io::Error,
	},
	#[error("Not a CMP file: {0:?}")]
	Magic([u8; 4]),
	#[error("Unexpected end of CMP data")]
	Truncated,
	#[error("Invalid CMP file version {0:#04x}")]
	Version(i32),
}

#[cfg(feature = "import")]
impl From<io::Error> for CmpImportError {
	fn from(source: io::Error) -> Self {
		match source.kind() {
			io::ErrorKind::UnexpectedEof => CmpImportError::Truncated,
			_ => CmpImportError::IO { source: source },
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PaletteEntry {
	pub red: u8,
	pub green: u8,
	pub blue: u8,
}

impl PaletteEntry {
	pub fn new(red: u8, green: u8, blue: u8) -> PaletteEntry {
		PaletteEntry {
			red: red,
			green: green,
			blue: blue,
		}
	}

	pub fn to_color(&self, alpha: u8) -> Color {
		Color::from_rgba8(self.red, self.green, self.blue, alpha)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
	pub magic: [u8; 4],
	pub version: i32,
	pub has_alpha_table: bool,
	reserved: Vec<u8>,
}

impl Header {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<Header, CmpImportError>
	where
		R: ReadBytesExt,
	{
		let magic = buf.read_tag4()?;
		let version = buf.read_i32::<LE>()?;
		let has_alpha_table = buf.read_i32::<LE>()? != 0;
		let reserved = buf.read_block(RESERVED_SIZE as u64)?;

		if magic != MAGIC {
			return Err(CmpImportError::Magic(magic));
		}
		if !SUPPORTED_VERSIONS.contains(&version) {
			return Err(CmpImportError::Version(version));
		}

		Ok(Header {
			magic: magic,
			version: version,
			has_alpha_table: has_alpha_table,
			reserved: reserved,
		})
	}
}

/// Read-only RGB palette shared by every decode that needs one
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
	/// `None` for palettes built in memory
	pub header: Option<Header>,
	pub palette: Vec<PaletteEntry>,
}

impl ColorMap {
	pub fn new(palette: Vec<PaletteEntry>) -> ColorMap {
		ColorMap {
			header: None,
			palette: palette,
		}
	}

	pub fn get(&self, index: usize) -> Option<PaletteEntry> {
		self.palette.get(index).copied()
	}

	pub fn len(&self) -> usize {
		self.palette.len()
	}

	pub fn is_empty(&self) -> bool {
		self.palette.is_empty()
	}

	/// Reads the header and the 256 color palette; light and transparency tables that
	/// may follow are left unread.
	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> Result<ColorMap, CmpImportError>
	where
		R: ReadBytesExt,
	{
		let header = Header::read(buf)?;
		let raw = buf.read_block((PALETTE_SIZE * 3) as u64)?;

		Ok(ColorMap {
			header: Some(header),
			palette: raw.chunks_exact(3).map(|c| PaletteEntry::new(c[0], c[1], c[2])).collect(),
		})
	}

	#[cfg(feature = "import")]
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<ColorMap, CmpImportError> {
		let mut buf = BufReader::new(File::open(filepath)?);
		ColorMap::read(&mut buf)
	}
}
