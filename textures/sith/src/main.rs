use std::path::PathBuf;

use anyhow::{
	Context,
	Result
};

use clap::Parser;

use rgk_textures_sith::{
	cmp::ColorMap,
	ImportCfg,
	ImportFlag,
	mat::Records,
	read_mat
};

/// Prints the header, records and decoded cels of a Sith engine MAT file
#[derive(Parser)]
#[command(version)]
struct Cli {
	/// Input MAT file
	input: PathBuf,

	/// ColorMap used for indexed and color materials
	#[arg(short, long)]
	cmp: Option<PathBuf>,

	/// Keep every mip level instead of only the first
	#[arg(long)]
	keep_levels: bool,

	/// Honor the mipmap transparent color
	#[arg(long)]
	apply_transparency: bool,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.init();

	let cli = Cli::parse();

	let cmp = match cli.cmp {
		Some(ref path) => Some(ColorMap::load(path).with_context(|| format!("Failed to load ColorMap {:?}", path))?),
		None => None,
	};

	let mut cfg = ImportCfg::default();
	cfg.flags.set(ImportFlag::KEEP_MIP_LEVELS, cli.keep_levels);
	cfg.flags.set(ImportFlag::APPLY_TRANSPARENCY, cli.apply_transparency);

	let mat = read_mat(&cli.input, cmp.as_ref(), &cfg)
		.with_context(|| format!("Failed to import {:?}", cli.input))?;

	println!("{:#?}", mat.header);

	match mat.records {
		Records::Color(ref records) => {
			for (i, r) in records.iter().enumerate() {
				println!("record {}: color index {}", i, r.color_index);
			}
		},
		Records::Texture(ref records) => {
			for (i, r) in records.iter().enumerate() {
				println!("record {}: cel {}", i, r.cel_index);
			}
		},
	}

	for cel in mat.cels.iter() {
		let first = cel.pixels.as_ref().and_then(|p| p.first());
		match first {
			Some(c) => println!("{}: {}x{}, first pixel {} alpha {:.3}, {} extra level(s)", cel.name, cel.width,
				cel.height, c.hex_rgb(), c.alpha, cel.mip_levels.len()),
			None => println!("{}: {}x{}, placeholder", cel.name, cel.width, cel.height),
		}
	}

	for w in mat.warnings.iter() {
		println!("warning: {}", w);
	}

	Ok(())
}
