use std::collections::HashMap;

use crate::texture::Color;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatPropValueID {
	Diffuse,
	Roughness,
	Specular,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatPropValue {
	Color(Color),
	Float(f32),
}

/// [`HashMap`] type alias for material properties
pub type MaterialPropertyMap = HashMap<MatPropValueID, MatPropValue>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendMode {
	Opaque,
	Blend,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TextureSource {
	/// Top-down RGBA pixels, `width * height` long
	Pixels(Vec<Color>),
	/// Generated grid placeholder for textures without image data
	UvGrid,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureSlot {
	pub name: String,
	pub width: usize,
	pub height: usize,
	pub source: TextureSource,
	pub use_alpha: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
	pub name: String,
	pub properties: MaterialPropertyMap,
	pub blend: BlendMode,
	pub textures: Vec<TextureSlot>,
}

impl Material {
	/// Creates an unlit material with a white base color
	pub fn new(name: &str) -> Material {
		let mut properties = MaterialPropertyMap::new();
		properties.insert(MatPropValueID::Diffuse, MatPropValue::Color(Color::from_rgb8(255, 255, 255)));
		properties.insert(MatPropValueID::Roughness, MatPropValue::Float(1.0));
		properties.insert(MatPropValueID::Specular, MatPropValue::Float(0.0));

		Material {
			name: name.to_string(),
			properties: properties,
			blend: BlendMode::Opaque,
			textures: vec![],
		}
	}

	/// Removes every texture slot and resets the blend mode
	pub fn clear_textures(&mut self) {
		self.textures.clear();
		self.blend = BlendMode::Opaque;
	}

	/// Appends a texture slot; a slot using alpha switches the material to blending
	pub fn add_texture(&mut self, slot: TextureSlot) {
		if slot.use_alpha {
			self.blend = BlendMode::Blend;
		}

		self.textures.push(slot);
	}
}
