use byteorder::ReadBytesExt;

use tracing::warn;

use rgk_core::{
	io_ext::ReadBinExt,
	texture::{
		Color,
		flip_rows
	}
};

use crate::{
	cmp::ColorMap,
	mat::{
		ColorFormat,
		ColorMode,
		FormatError
	}
};

/// Returns a mask of the lowest `bits` bits.
/// Zero bits yield an empty mask; 32 or more give a full one.
pub fn color_mask(bits: u32) -> u32 {
	u32::MAX.checked_shr(32u32.saturating_sub(bits)).unwrap_or(0)
}

#[inline]
fn shl(value: u32, n: u32) -> u32 {
	value.checked_shl(n).unwrap_or(0)
}

#[inline]
fn shr(value: u32, n: u32) -> u32 {
	value.checked_shr(n).unwrap_or(0)
}

#[inline]
fn channel(word: u32, bits: u32, shift_l: u32, shift_r: u32) -> u32 {
	shl(shr(word, shift_l) & color_mask(bits), shift_r)
}

fn alpha(word: u32, cf: &ColorFormat) -> u32 {
	match cf.alpha_bpp {
		0 => 255,
		// single bit alpha is either fully transparent or fully opaque
		1 => channel(word, 1, cf.alpha_shl, cf.alpha_shr).wrapping_mul(255).min(255),
		bits => channel(word, bits, cf.alpha_shl, cf.alpha_shr),
	}
}

/// Expands one stored pixel into an `R | G << 8 | B << 16 | A << 24` word
pub fn decode_word(word: u32, cf: &ColorFormat) -> u32 {
	channel(word, cf.red_bpp, cf.red_shl, cf.red_shr) |
		shl(channel(word, cf.green_bpp, cf.green_shl, cf.green_shr), 8) |
		shl(channel(word, cf.blue_bpp, cf.blue_shl, cf.blue_shr), 16) |
		shl(alpha(word, cf), 24)
}

/// Decodes a bottom-up block of palette indices into a top-down image.
/// Without a palette nothing is decoded and an empty image is returned.
pub fn decode_indexed(data: &[u8], width: usize, height: usize, cmp: Option<&ColorMap>,
	transparent_color: Option<u8>) -> Result<Vec<Color>, FormatError>
{
	let cmp = match cmp {
		Some(cmp) => cmp,
		None => {
			warn!("Missing ColorMap, pixel data not decoded!");
			return Ok(vec![]);
		},
	};

	if data.len() != width * height {
		return Err(FormatError::PixelCount {
			expected: width * height,
			actual: data.len(),
		});
	}

	let pixels = data.iter()
		.map(|&i| {
			let entry = cmp.get(i as usize).ok_or(FormatError::ColorIndex {
				index: i as usize,
				len: cmp.len(),
			})?;

			let a = if transparent_color == Some(i) { 0 } else { 255 };
			Ok(entry.to_color(a))
		})
		.collect::<Result<Vec<Color>, FormatError>>()?;

	Ok(flip_rows(&pixels, width))
}

/// Decodes a bottom-up block of packed pixels into a top-down image
pub fn decode_rgba(data: &[u8], width: usize, height: usize, cf: &ColorFormat) -> Result<Vec<Color>, FormatError> {
	let word_size = match cf.bpp {
		8 => 1,
		16 => 2,
		24 => 3,
		_ => 4,
	};

	if data.len() != width * height * word_size {
		return Err(FormatError::PixelCount {
			expected: width * height * word_size,
			actual: data.len(),
		});
	}

	let pixels: Vec<Color> = data.chunks_exact(word_size)
		.map(|p| match *p {
			[v] => v as u32,
			[lo, hi] => u16::from_le_bytes([lo, hi]) as u32,
			// 24-bit pixels get an opaque fourth byte
			[b0, b1, b2] => u32::from_le_bytes([b0, b1, b2, 255]),
			[b0, b1, b2, b3] => u32::from_le_bytes([b0, b1, b2, b3]),
			_ => unreachable!("chunks_exact yields {} byte words", word_size),
		})
		.map(|word| Color::from_rgba_le(decode_word(word, cf)))
		.collect();

	Ok(flip_rows(&pixels, width))
}

/// Reads one `width` x `height` pixel block and decodes it.
/// Indexed and 8 bpp data go through the palette, anything else is unpacked.
pub fn read_pixel_data<R>(buf: &mut R, width: usize, height: usize, cf: &ColorFormat, cmp: Option<&ColorMap>,
	transparent_color: Option<u8>) -> Result<Vec<Color>, FormatError>
where
	R: ReadBytesExt,
{
	let size = cf.pixel_data_size(width, height).ok_or(FormatError::DataSize {
		width: width,
		height: height,
		bpp: cf.bpp,
	})?;
	let data = buf.read_block(size)?;

	if cf.color_mode == ColorMode::Indexed || cf.bpp == 8 {
		decode_indexed(&data, width, height, cmp, transparent_color)
	} else {
		decode_rgba(&data, width, height, cf)
	}
}

/// Per-pixel palette lookup used by mipmap levels; rows keep their stored order
pub fn lookup_palette(indices: &[u8], cmp: &ColorMap, transparent_color: Option<u8>) -> Result<Vec<Color>, FormatError> {
	indices.iter()
		.map(|&i| {
			let entry = cmp.get(i as usize).ok_or(FormatError::ColorIndex {
				index: i as usize,
				len: cmp.len(),
			})?;

			Ok(entry.to_color(if transparent_color == Some(i) { 0 } else { 255 }))
		})
		.collect()
}
