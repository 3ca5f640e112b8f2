//! In-memory MAT and CMP files for tests

use byteorder::{
	LE,
	WriteBytesExt
};

use rgk_core::texture::Color;

use crate::{
	cmp::{
		self,
		ColorMap,
		PaletteEntry
	},
	mat::{
		ColorFormat,
		ColorMode,
		MAGIC,
		VERSION
	}
};

pub struct RawHeader {
	pub magic: [u8; 4],
	pub version: u32,
	pub kind: i32,
	pub record_count: i32,
	pub texture_count: i32,
	pub color_info: [u32; 14],
}

impl RawHeader {
	pub fn color(records: i32) -> RawHeader {
		RawHeader {
			magic: MAGIC,
			version: VERSION,
			kind: 0,
			record_count: records,
			texture_count: 0,
			color_info: raw_format(&indexed()),
		}
	}

	pub fn texture(textures: i32, cf: ColorFormat) -> RawHeader {
		RawHeader {
			magic: MAGIC,
			version: VERSION,
			kind: 2,
			record_count: textures,
			texture_count: textures,
			color_info: raw_format(&cf),
		}
	}
}

pub fn raw_format(cf: &ColorFormat) -> [u32; 14] {
	[
		cf.color_mode as u32, cf.bpp,
		cf.red_bpp, cf.green_bpp, cf.blue_bpp,
		cf.red_shl, cf.green_shl, cf.blue_shl,
		cf.red_shr, cf.green_shr, cf.blue_shr,
		cf.alpha_bpp, cf.alpha_shl, cf.alpha_shr,
	]
}

fn format(color_mode: ColorMode, bpp: u32, rgb_bpp: [u32; 3], rgb_shl: [u32; 3], rgb_shr: [u32; 3], alpha: [u32; 3]) -> ColorFormat {
	ColorFormat {
		color_mode: color_mode,
		bpp: bpp,
		red_bpp: rgb_bpp[0],
		green_bpp: rgb_bpp[1],
		blue_bpp: rgb_bpp[2],
		red_shl: rgb_shl[0],
		green_shl: rgb_shl[1],
		blue_shl: rgb_shl[2],
		red_shr: rgb_shr[0],
		green_shr: rgb_shr[1],
		blue_shr: rgb_shr[2],
		alpha_bpp: alpha[0],
		alpha_shl: alpha[1],
		alpha_shr: alpha[2],
	}
}

pub fn indexed() -> ColorFormat {
	format(ColorMode::Indexed, 8, [0; 3], [0; 3], [0; 3], [0; 3])
}

pub fn rgb565() -> ColorFormat {
	format(ColorMode::RGB, 16, [5, 6, 5], [11, 5, 0], [3, 2, 3], [0; 3])
}

pub fn rgba5551() -> ColorFormat {
	format(ColorMode::RGBA, 16, [5, 5, 5], [10, 5, 0], [3, 3, 3], [1, 15, 0])
}

pub fn rgba8888() -> ColorFormat {
	format(ColorMode::RGBA, 32, [8, 8, 8], [0, 8, 16], [0; 3], [8, 24, 0])
}

pub fn header(raw: &RawHeader) -> Vec<u8> {
	let mut data = raw.magic.to_vec();
	data.write_u32::<LE>(raw.version).unwrap();
	data.write_i32::<LE>(raw.kind).unwrap();
	data.write_i32::<LE>(raw.record_count).unwrap();
	data.write_i32::<LE>(raw.texture_count).unwrap();
	for v in raw.color_info.iter() {
		data.write_u32::<LE>(*v).unwrap();
	}
	data
}

fn write_i32s(data: &mut Vec<u8>, values: &[i32]) {
	for v in values.iter() {
		data.write_i32::<LE>(*v).unwrap();
	}
}

pub fn color_record(data: &mut Vec<u8>, color_index: i32) {
	write_i32s(data, &[0, color_index, 0, 0, 0, 0]);
}

pub fn texture_record(data: &mut Vec<u8>, cel_index: i32) {
	write_i32s(data, &[8, 0, 0, 0x3F80_0000, 0x3F80_0000, 0, 4, 0xBFF78482u32 as i32, 0, cel_index]);
}

pub fn mipmap_header_raw(fields: [i32; 6]) -> Vec<u8> {
	let mut data = vec![];
	write_i32s(&mut data, &fields);
	data
}

pub fn mipmap_header(data: &mut Vec<u8>, width: i32, height: i32, levels: i32) {
	write_i32s(data, &[width, height, 0, 0, 0, levels]);
}

pub fn palette_entry(i: usize) -> PaletteEntry {
	PaletteEntry::new(i as u8, 255 - i as u8, ((i * 3) % 256) as u8)
}

pub fn palette_color(i: usize) -> Color {
	palette_entry(i).to_color(255)
}

pub fn colormap_with_header(header: Option<cmp::Header>) -> ColorMap {
	ColorMap {
		header: header,
		palette: (0..cmp::PALETTE_SIZE).map(palette_entry).collect(),
	}
}

pub fn colormap() -> ColorMap {
	colormap_with_header(None)
}

pub fn cmp_file(version: i32) -> Vec<u8> {
	let mut data = cmp::MAGIC.to_vec();
	data.write_i32::<LE>(version).unwrap();
	data.write_i32::<LE>(0).unwrap();
	data.extend_from_slice(&[0; 52]);
	for i in 0..cmp::PALETTE_SIZE {
		let e = palette_entry(i);
		data.extend_from_slice(&[e.red, e.green, e.blue]);
	}
	// light level tables follow the palette
	data.extend_from_slice(&[0; 64]);
	data
}
