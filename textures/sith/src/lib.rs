pub mod cmp;
#[cfg(feature = "import")]
pub mod decode;
pub mod mat;
#[cfg(feature = "import")]
pub mod material;
pub mod sink;

#[cfg(all(test, feature = "import"))]
mod fixtures;

use bitflags::bitflags;

#[cfg(feature = "import")]
use std::{
	fs::File,
	io::BufReader,
	path::Path
};

#[cfg(feature = "import")]
use cmp::ColorMap;

#[cfg(feature = "import")]
use mat::FormatError;

#[cfg(feature = "import")]
use material::{
	DecodeWarning,
	Material
};

use sink::MaterialSink;

bitflags! {
	pub struct ImportFlag: u32 {
		/// Keep every mip level instead of only the first
		const KEEP_MIP_LEVELS = 1;
		/// Honor the mipmap transparent color when looking up indexed levels
		const APPLY_TRANSPARENCY = 2;
	}
}

impl Default for ImportFlag {
	fn default() -> Self {
		ImportFlag::empty()
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportCfg {
	pub flags: ImportFlag,
}

/// Decodes a MAT file. The file is closed before this returns, on success or failure.
#[cfg(feature = "import")]
pub fn read_mat<P: AsRef<Path>>(filepath: P, cmp: Option<&ColorMap>, cfg: &ImportCfg) -> Result<Material, FormatError> {
	let filepath = filepath.as_ref();
	let name = filepath
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_default();

	let mut buf = BufReader::new(File::open(filepath)?);
	Material::read(&name, &mut buf, cmp, cfg)
}

/// Decodes a MAT file and emits its cels into `sink`.
/// The sink is only touched once the whole file decoded successfully.
#[cfg(feature = "import")]
pub fn import_mat<P, S>(filepath: P, cmp: Option<&ColorMap>, cfg: &ImportCfg, sink: &mut S) -> Result<Vec<DecodeWarning>, FormatError>
where
	P: AsRef<Path>,
	S: MaterialSink,
{
	let mat = read_mat(filepath, cmp, cfg)?;
	mat.emit(sink);
	Ok(mat.warnings)
}
