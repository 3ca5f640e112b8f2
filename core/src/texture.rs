/// Linear color with every channel normalized to `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
	pub red: f32,
	pub green: f32,
	pub blue: f32,
	pub alpha: f32,
}

impl Color {
	/// Builds an opaque color from 8-bit channels
	pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Color {
		Color::from_rgba8(red, green, blue, 255)
	}

	/// Builds a color from 8-bit channels, each divided by 255
	pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
		Color {
			red: (red as f32) / 255.0,
			green: (green as f32) / 255.0,
			blue: (blue as f32) / 255.0,
			alpha: (alpha as f32) / 255.0,
		}
	}

	/// Splits a word laid out as `R | G << 8 | B << 16 | A << 24`
	pub fn from_rgba_le(word: u32) -> Color {
		let [r, g, b, a] = word.to_le_bytes();
		Color::from_rgba8(r, g, b, a)
	}

	pub fn to_rgba8888(&self) -> u32 {
		((self.red * 255.0).round() as u32) << 24 | ((self.green * 255.0).round() as u32) << 16 |
			((self.blue * 255.0).round() as u32) << 8 | (self.alpha * 255.0).round() as u32
	}

	/// Returns a textual hex representation in the form of `#rrggbb`
	pub fn hex_rgb(&self) -> String {
		let r = (self.red * 255.0).round() as u8;
		let g = (self.green * 255.0).round() as u8;
		let b = (self.blue * 255.0).round() as u8;

		format!("#{:02x}{:02x}{:02x}", r, g, b)
	}
}

/// Reverses the row order of a row-major image, turning bottom-up storage into top-down.
/// A zero width yields an empty image.
pub fn flip_rows<T: Copy>(pixels: &[T], width: usize) -> Vec<T> {
	if width == 0 {
		return vec![];
	}

	pixels.chunks(width).rev().flatten().copied().collect()
}
