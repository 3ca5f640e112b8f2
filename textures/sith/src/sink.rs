use rgk_core::{
	scene::{
		Material,
		TextureSlot,
		TextureSource
	},
	texture::Color
};

use crate::mat::cel_name;

/// Receiver of decoded cels, implemented by whatever builds renderable surfaces
pub trait MaterialSink {
	/// Called once with the MAT file name before any cel is emitted
	fn begin(&mut self, _name: &str) {}

	/// `pixels` is `None` when the cel could not be decoded and needs a placeholder
	fn emit(&mut self, slot: usize, width: usize, height: usize, pixels: Option<&[Color]>, has_transparency: bool);
}

/// Re-importing into an existing material replaces all of its texture slots
impl MaterialSink for Material {
	fn begin(&mut self, name: &str) {
		self.name = name.to_string();
		self.clear_textures();
	}

	fn emit(&mut self, slot: usize, width: usize, height: usize, pixels: Option<&[Color]>, has_transparency: bool) {
		let source = match pixels {
			Some(p) => TextureSource::Pixels(p.to_vec()),
			None => TextureSource::UvGrid,
		};

		self.add_texture(TextureSlot {
			name: cel_name(&self.name, slot),
			width: width,
			height: height,
			source: source,
			use_alpha: has_transparency,
		});
	}
}
