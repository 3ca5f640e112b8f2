use byteorder::{
	LE,
	ReadBytesExt
};

use std::{
	io,
	path::Path
};

use thiserror::Error;

use rgk_core::{
	io_ext::ReadBinExt,
	texture::Color
};

#[cfg(feature = "import")]
use crate::{
	cmp::{
		ColorMap,
		PALETTE_SIZE
	},
	decode,
	ImportFlag
};

pub const MAGIC: [u8; 4] = *b"MAT ";
pub const VERSION: u32 = 0x32;

/// Size of the generated single color textures
pub const COLOR_TEX_WIDTH: usize = 32;
pub const COLOR_TEX_HEIGHT: usize = 32;

/// Number of texture slots the host can bind per material
pub const MAX_TEXTURE_SLOTS: usize = 18;

/// Longest mip chain an `i32` sized image can have
pub const MAX_MIP_LEVELS: i32 = 32;

#[cfg(feature = "import")]
#[derive(Debug, Error)]
pub enum FormatError {
	#[error("Color index {index} is outside of the {len} entry ColorMap")]
	ColorIndex {
		index: usize,
		len: usize,
	},
	#[error("ColorMap has less than 256 colors: {0}")]
	ColorMapSize(usize),
	#[error("Invalid color mode: {0}")]
	ColorMode(u32),
	#[error("MAT file record and texture count mismatch: {records} != {textures}")]
	CountMismatch {
		records: i32,
		textures: i32,
	},
	#[error("Invalid color depth: {0}")]
	Depth(u32),
	#[error("Invalid mipmap dimensions: {width}x{height}")]
	Dimensions {
		width: i32,
		height: i32,
	},
	#[error("{width}x{height} pixels at {bpp} bpp is too large")]
	DataSize {
		width: usize,
		height: usize,
		bpp: u32,
	},
	#[error("I/O error")]
	IO {
		#[source]
		source: io::Error,
	},
	#[error("Invalid MAT file type: {0}")]
	Kind(i32),
	#[error("Invalid magic: {0:?}")]
	Magic([u8; 4]),
	#[error("Invalid mipmap level count: {0}")]
	Levels(i32),
	#[error("Missing ColorMap for indexed color mode")]
	MissingColorMap,
	#[error("MAT file contains no record(s): {0}")]
	NoRecords(i32),
	#[error("Pixel data size mismatch: expected {expected} bytes, got {actual}")]
	PixelCount {
		expected: usize,
		actual: usize,
	},
	#[error("Unexpected end of MAT data")]
	Truncated,
	#[error("Invalid MAT file version: {0:#x}")]
	Version(u32),
}

#[cfg(feature = "import")]
impl From<io::Error> for FormatError {
	fn from(source: io::Error) -> Self {
		match source.kind() {
			io::ErrorKind::UnexpectedEof => FormatError::Truncated,
			_ => FormatError::IO { source: source },
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(i32)]
pub enum MatType {
	Color = 0,
	Texture = 2,
}

impl MatType {
	pub fn from_raw(kind: i32) -> Option<MatType> {
		match kind {
			0 => Some(MatType::Color),
			2 => Some(MatType::Texture),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u32)]
pub enum ColorMode {
	Indexed = 0,
	RGB,
	RGBA,
}

impl ColorMode {
	pub fn from_raw(mode: u32) -> Option<ColorMode> {
		match mode {
			0 => Some(ColorMode::Indexed),
			1 => Some(ColorMode::RGB),
			2 => Some(ColorMode::RGBA),
			_ => None,
		}
	}
}

/// Bit layout of a stored pixel.
/// A channel is extracted as `((word >> shl) & mask(bpp)) << shr`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorFormat {
	pub color_mode: ColorMode,
	pub bpp: u32,
	pub red_bpp: u32,
	pub green_bpp: u32,
	pub blue_bpp: u32,
	pub red_shl: u32,
	pub green_shl: u32,
	pub blue_shl: u32,
	pub red_shr: u32,
	pub green_shr: u32,
	pub blue_shr: u32,
	pub alpha_bpp: u32,
	pub alpha_shl: u32,
	pub alpha_shr: u32,
}

impl ColorFormat {
	/// Number of bytes a `width` x `height` block of pixels occupies, or `None` if it
	/// does not fit in 64 bits
	pub fn pixel_data_size(&self, width: usize, height: usize) -> Option<u64> {
		(width as u64)
			.checked_mul(height as u64)?
			.checked_mul(self.bpp as u64)
			.map(|bits| bits / 8)
	}

	pub fn has_alpha(&self) -> bool {
		self.alpha_bpp > 0
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
	pub magic: [u8; 4],
	pub version: u32,
	pub kind: MatType,
	pub record_count: i32,
	pub texture_count: i32,
	pub color_info: ColorFormat,
}

impl Header {
	/// Reads the header and color format block, then validates them
	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> Result<Header, FormatError>
	where
		R: ReadBytesExt,
	{
		let magic = buf.read_tag4()?;
		let version = buf.read_u32::<LE>()?;
		let kind = buf.read_i32::<LE>()?;
		let record_count = buf.read_i32::<LE>()?;
		let texture_count = buf.read_i32::<LE>()?;

		let mut cf = [0; 14];
		buf.read_u32_into::<LE>(&mut cf)?;

		if magic != MAGIC {
			return Err(FormatError::Magic(magic));
		}
		if version != VERSION {
			return Err(FormatError::Version(version));
		}

		let kind = MatType::from_raw(kind).ok_or(FormatError::Kind(kind))?;
		if kind == MatType::Texture && record_count != texture_count {
			return Err(FormatError::CountMismatch {
				records: record_count,
				textures: texture_count,
			});
		}
		if record_count <= 0 {
			return Err(FormatError::NoRecords(record_count));
		}

		let color_mode = ColorMode::from_raw(cf[0]).ok_or(FormatError::ColorMode(cf[0]))?;

		// Only depths failing both rules are rejected, so 40 still passes
		let bpp = cf[1];
		if bpp % 8 != 0 && !(8..=32).contains(&bpp) {
			return Err(FormatError::Depth(bpp));
		}

		Ok(Header {
			magic: magic,
			version: version,
			kind: kind,
			record_count: record_count,
			texture_count: texture_count,
			color_info: ColorFormat {
				color_mode: color_mode,
				bpp: bpp,
				red_bpp: cf[2],
				green_bpp: cf[3],
				blue_bpp: cf[4],
				red_shl: cf[5],
				green_shl: cf[6],
				blue_shl: cf[7],
				red_shr: cf[8],
				green_shr: cf[9],
				blue_shr: cf[10],
				alpha_bpp: cf[11],
				alpha_shl: cf[12],
				alpha_shr: cf[13],
			},
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRecord {
	pub kind: i32,
	pub color_index: i32,
	pub unknown_1: i32,
	pub unknown_2: i32,
	pub unknown_3: i32,
	pub unknown_4: i32,
}

impl ColorRecord {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<ColorRecord, FormatError>
	where
		R: ReadBytesExt,
	{
		Ok(ColorRecord {
			kind: buf.read_i32::<LE>()?,
			color_index: buf.read_i32::<LE>()?,
			unknown_1: buf.read_i32::<LE>()?,
			unknown_2: buf.read_i32::<LE>()?,
			unknown_3: buf.read_i32::<LE>()?,
			unknown_4: buf.read_i32::<LE>()?,
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureRecord {
	pub kind: i32,
	pub color_index: i32,
	pub unknown_1: i32,
	pub unknown_2: i32,
	pub unknown_3: i32,
	pub unknown_4: i32,
	pub unknown_5: i32,
	pub unknown_6: i32,
	pub unknown_7: i32,
	pub cel_index: i32,
}

impl TextureRecord {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<TextureRecord, FormatError>
	where
		R: ReadBytesExt,
	{
		Ok(TextureRecord {
			kind: buf.read_i32::<LE>()?,
			color_index: buf.read_i32::<LE>()?,
			unknown_1: buf.read_i32::<LE>()?,
			unknown_2: buf.read_i32::<LE>()?,
			unknown_3: buf.read_i32::<LE>()?,
			unknown_4: buf.read_i32::<LE>()?,
			unknown_5: buf.read_i32::<LE>()?,
			unknown_6: buf.read_i32::<LE>()?,
			unknown_7: buf.read_i32::<LE>()?,
			cel_index: buf.read_i32::<LE>()?,
		})
	}
}

/// Cel records in file order; the position of a record is its texture slot
#[derive(Clone, Debug, PartialEq)]
pub enum Records {
	Color(Vec<ColorRecord>),
	Texture(Vec<TextureRecord>),
}

impl Records {
	#[cfg(feature = "import")]
	pub fn read<R>(header: &Header, buf: &mut R) -> Result<Records, FormatError>
	where
		R: ReadBytesExt,
	{
		match header.kind {
			MatType::Color => {
				let mut records = vec![];
				for _ in 0..header.record_count {
					records.push(ColorRecord::read(buf)?);
				}
				Ok(Records::Color(records))
			},
			MatType::Texture => {
				let mut records = vec![];
				for _ in 0..header.record_count {
					records.push(TextureRecord::read(buf)?);
				}
				Ok(Records::Texture(records))
			},
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Records::Color(r) => r.len(),
			Records::Texture(r) => r.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MipmapHeader {
	pub width: i32,
	pub height: i32,
	pub transparent: i32,
	pub unknown_1: i32,
	pub transparent_color: i32,
	pub levels: i32,
}

impl MipmapHeader {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<MipmapHeader, FormatError>
	where
		R: ReadBytesExt,
	{
		Ok(MipmapHeader {
			width: buf.read_i32::<LE>()?,
			height: buf.read_i32::<LE>()?,
			transparent: buf.read_i32::<LE>()?,
			unknown_1: buf.read_i32::<LE>()?,
			transparent_color: buf.read_i32::<LE>()?,
			levels: buf.read_i32::<LE>()?,
		})
	}

	#[cfg(feature = "import")]
	fn dimensions(&self) -> Result<(usize, usize), FormatError> {
		let invalid = FormatError::Dimensions {
			width: self.width,
			height: self.height,
		};

		match (usize::try_from(self.width), usize::try_from(self.height)) {
			(Ok(w), Ok(h)) if w.checked_mul(h).is_some() => Ok((w, h)),
			_ => Err(invalid),
		}
	}

	/// Palette index rendered fully transparent, if the mipmap declares one
	pub fn transparent_index(&self) -> Option<u8> {
		if self.transparent == 0 {
			return None;
		}

		u8::try_from(self.transparent_color).ok()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mipmap {
	pub header: MipmapHeader,
	pub color_info: ColorFormat,
	/// Decoded levels, largest first.
	/// Indexed levels are plain palette lookups in stored (bottom-up) row order, while
	/// packed levels went through the whole-image decoder and are flipped top-down.
	pub levels: Vec<Vec<Color>>,
}

impl Mipmap {
	/// Reads a mipmap header and all of its levels.
	/// Every level is consumed from the stream; only level 0 is kept unless
	/// [`ImportFlag::KEEP_MIP_LEVELS`] is set.
	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R, cf: &ColorFormat, cmp: Option<&ColorMap>, flags: ImportFlag) -> Result<Mipmap, FormatError>
	where
		R: ReadBytesExt,
	{
		let header = MipmapHeader::read(buf)?;

		let palette = match (cf.color_mode, cmp) {
			(ColorMode::Indexed, None) => return Err(FormatError::MissingColorMap),
			(ColorMode::Indexed, Some(cmp)) if cmp.len() < PALETTE_SIZE => {
				return Err(FormatError::ColorMapSize(cmp.len()))
			},
			(ColorMode::Indexed, Some(cmp)) => Some(cmp),
			_ => None,
		};

		let (width, height) = header.dimensions()?;
		if header.levels > MAX_MIP_LEVELS {
			return Err(FormatError::Levels(header.levels));
		}

		let transparent = if flags.contains(ImportFlag::APPLY_TRANSPARENCY) {
			header.transparent_index()
		} else {
			None
		};

		let mut levels = vec![];
		for level in 0..header.levels.max(0) {
			let pixels = match palette {
				Some(cmp) => {
					let indices = buf.read_block((width * height) as u64)?;
					decode::lookup_palette(&indices, cmp, transparent)?
				},
				None => decode::read_pixel_data(buf, width, height, cf, cmp, None)?,
			};

			if level == 0 || flags.contains(ImportFlag::KEEP_MIP_LEVELS) {
				levels.push(pixels);
			}
		}

		Ok(Mipmap {
			header: header,
			color_info: *cf,
			levels: levels,
		})
	}

	pub fn width(&self) -> usize {
		self.header.width.max(0) as usize
	}

	pub fn height(&self) -> usize {
		self.header.height.max(0) as usize
	}

	/// Returns level 0, or `None` if no pixels were decoded for it
	pub fn first_level(&self) -> Option<&[Color]> {
		self.levels.first().map(|l| l.as_slice()).filter(|l| !l.is_empty())
	}
}

/// Returns the texture name of a cel: the material's file stem, suffixed with
/// `_cel_N` for every cel after the first.
pub fn cel_name(mat_name: &str, index: usize) -> String {
	let stem = Path::new(mat_name)
		.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| mat_name.to_string());

	if index > 0 {
		format!("{}_cel_{}", stem, index)
	} else {
		stem
	}
}
