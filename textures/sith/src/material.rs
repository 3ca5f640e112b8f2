use byteorder::ReadBytesExt;

use thiserror::Error;

use tracing::{
	debug,
	info,
	warn
};

use rgk_core::texture::Color;

use crate::{
	cmp::ColorMap,
	ImportCfg,
	mat::*,
	sink::MaterialSink
};

/// Recoverable problems; the affected cel keeps its size but loses its pixels
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeWarning {
	#[error("Cel {slot}: color index {index} is not in the ColorMap, using a placeholder")]
	ColorIndex {
		slot: usize,
		index: i32,
	},
	#[error("Cel {slot}: no pixel data was decoded, using a placeholder")]
	EmptyPixelData {
		slot: usize,
	},
	#[error("Cel {slot}: missing ColorMap, only texture size will be loaded")]
	MissingColorMap {
		slot: usize,
	},
}

/// One texture slot of a material
#[derive(Clone, Debug, PartialEq)]
pub struct Cel {
	pub name: String,
	pub width: usize,
	pub height: usize,
	/// Level 0 image, or `None` when a placeholder has to stand in
	pub pixels: Option<Vec<Color>>,
	/// Levels past the first, kept only with `ImportFlag::KEEP_MIP_LEVELS`
	pub mip_levels: Vec<Vec<Color>>,
	pub has_transparency: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
	pub name: String,
	pub header: Header,
	pub records: Records,
	pub cels: Vec<Cel>,
	pub warnings: Vec<DecodeWarning>,
}

/// Number of cels the host can receive out of `count`
pub fn max_cels(count: usize) -> usize {
	count.min(MAX_TEXTURE_SLOTS)
}

impl Material {
	/// Decodes a whole MAT stream. Nothing outside the returned value is touched, so a
	/// failure leaves no partial state behind.
	pub fn read<R>(name: &str, buf: &mut R, cmp: Option<&ColorMap>, cfg: &ImportCfg) -> Result<Material, FormatError>
	where
		R: ReadBytesExt,
	{
		let header = Header::read(buf)?;
		let records = Records::read(&header, buf)?;

		let mut warnings = vec![];

		let cels = match records {
			Records::Color(ref records) => color_cels(name, records, cmp, &mut warnings),
			Records::Texture(_) => {
				let has_transparency = header.color_info.has_alpha();
				let mut cels = vec![];

				for i in 0..max_cels(header.texture_count.max(0) as usize) {
					debug!("Reading mipmap {}", i);
					let mm = Mipmap::read(buf, &header.color_info, cmp, cfg.flags)?;
					let (width, height) = (mm.width(), mm.height());

					let mut levels = mm.levels.into_iter();
					let pixels = levels.next().filter(|l| !l.is_empty());
					if pixels.is_none() {
						warnings.push(DecodeWarning::EmptyPixelData { slot: i });
					}

					cels.push(Cel {
						name: cel_name(name, i),
						width: width,
						height: height,
						pixels: pixels,
						mip_levels: levels.collect(),
						has_transparency: has_transparency,
					});
				}

				cels
			},
		};

		for w in warnings.iter() {
			warn!("{}: {}", name, w);
		}

		info!("{}: {:?} material, {} record(s), {} cel(s)", name, header.kind, records.len(), cels.len());

		Ok(Material {
			name: name.to_string(),
			header: header,
			records: records,
			cels: cels,
			warnings: warnings,
		})
	}

	/// Whether the material as a whole carries alpha
	pub fn has_transparency(&self) -> bool {
		self.header.color_info.has_alpha()
	}

	/// Hands every cel to the host, in slot order
	pub fn emit<S: MaterialSink>(&self, sink: &mut S) {
		sink.begin(&self.name);

		for (slot, cel) in self.cels.iter().enumerate() {
			sink.emit(slot, cel.width, cel.height, cel.pixels.as_deref(), cel.has_transparency);
		}
	}
}

/// Builds one uniform 32x32 texture per color record
fn color_cels(name: &str, records: &[ColorRecord], cmp: Option<&ColorMap>, warnings: &mut Vec<DecodeWarning>) -> Vec<Cel> {
	records.iter()
		.take(max_cels(records.len()))
		.enumerate()
		.map(|(slot, r)| {
			let pixels = match cmp {
				Some(cmp) => {
					let entry = usize::try_from(r.color_index).ok().and_then(|i| cmp.get(i));
					if entry.is_none() {
						warnings.push(DecodeWarning::ColorIndex {
							slot: slot,
							index: r.color_index,
						});
					}

					entry.map(|e| vec![e.to_color(255); COLOR_TEX_WIDTH * COLOR_TEX_HEIGHT])
				},
				None => {
					warnings.push(DecodeWarning::MissingColorMap { slot: slot });
					None
				},
			};

			Cel {
				name: cel_name(name, slot),
				width: COLOR_TEX_WIDTH,
				height: COLOR_TEX_HEIGHT,
				pixels: pixels,
				mip_levels: vec![],
				has_transparency: false,
			}
		})
		.collect()
}
