use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

/// Compress, decompress, and convert SC asset containers and their KTX/ASTC image payloads.
#[derive(Debug, Clone, Parser)]
#[command(name = "sc", version, about)]
pub struct Args {
	#[command(subcommand)]
	pub action: Action,

	/// Increase logging verbosity. Can be repeated, e.g. `-vvv`.
	#[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
	pub verbose: Option<u8>,

	/// Write logs to this file (or, if a directory, a timestamped file within it) instead of
	/// stderr.
	#[arg(long, global = true, value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// Compress a file into an SC container.
	#[command(visible_alias = "c")]
	Compress(CompressArgs),

	/// Decompress an SC container.
	#[command(visible_alias = "d")]
	Decompress(DecompressArgs),

	/// Decompress then recompress, optionally changing codec or container.
	#[command(visible_alias = "v")]
	Convert(ConvertArgs),
}

/// Which payload shape the input/output is.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Format {
	/// Arbitrary bytes.
	Binary,
	/// A KTX-wrapped texture.
	Image,
}

/// Outer wrapper to apply around the payload.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Container {
	/// No wrapper: raw bytes in, raw bytes out.
	None,
	/// The SC asset-container codec.
	Sc,
	/// The ASTC block-stream wrapper.
	Astc,
}

/// Which inner codec to use.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Method {
	/// LZMA.
	Lzma,
	/// Zstandard.
	Zstd,
	/// LZHAM. Framing is produced correctly; the payload itself cannot be written (see the
	/// `sc::codec::lzham` module), so this will fail at runtime.
	Lzham,
	/// ASTC block compression (for image payloads only).
	Astc,
}

#[derive(Debug, Clone, Parser)]
pub struct CompressArgs {
	/// Input file.
	#[arg(value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub input: PathBuf,

	/// Output file.
	#[arg(value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub output: PathBuf,

	/// Payload shape.
	#[arg(long, value_enum, default_value_t = Format::Binary)]
	pub format: Format,

	/// Outer wrapper.
	#[arg(long, value_enum, default_value_t = Container::Sc)]
	pub container: Container,

	/// Inner compression method.
	#[arg(long, value_enum, default_value_t = Method::Zstd)]
	pub method: Method,

	/// Worker thread count for the inner codec. 0 uses all available cores.
	#[arg(long, default_value_t = 0)]
	pub threads: u32,

	/// Write a version-4 container with an asset metadata trailer.
	#[arg(long)]
	pub write_assets: bool,

	/// Widen the LZMA unpacked-length field to 64 bits on write.
	///
	/// The reader this crate ships only ever reads the 32-bit form, matching the original tool;
	/// files written with this flag are only readable by writers that share that same quirk.
	#[arg(long)]
	pub lzma_long_unpacked_length: bool,

	/// Flip image rows vertically before wrapping. No-op: wired through for surface completeness
	/// only, see the `sc-image` crate's scope notes.
	#[arg(long)]
	pub image_vertical_flip: bool,

	/// Emit mipmap levels for image payloads. No-op: wired through for surface completeness only.
	#[arg(long)]
	pub image_save_mips: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct DecompressArgs {
	/// Input file.
	#[arg(value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub input: PathBuf,

	/// Output file.
	#[arg(value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub output: PathBuf,

	/// Print the asset names and hashes recovered from a version-4 metadata trailer.
	#[arg(long)]
	pub print_sc_metadata: bool,

	/// Flip image rows vertically after unwrapping. No-op, see `CompressArgs::image_vertical_flip`.
	#[arg(long)]
	pub image_vertical_flip: bool,

	/// Keep mipmap levels for image payloads. No-op, see `CompressArgs::image_save_mips`.
	#[arg(long)]
	pub image_save_mips: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
	/// Input file.
	#[arg(value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub input: PathBuf,

	/// Output file.
	#[arg(value_hint = ValueHint::AnyPath, value_name = "PATH")]
	pub output: PathBuf,

	/// Payload shape.
	#[arg(long, value_enum, default_value_t = Format::Binary)]
	pub format: Format,

	/// Outer wrapper to write.
	#[arg(long, value_enum, default_value_t = Container::Sc)]
	pub container: Container,

	/// Inner compression method to write.
	#[arg(long, value_enum, default_value_t = Method::Zstd)]
	pub method: Method,

	/// Worker thread count for the inner codec. 0 uses all available cores.
	#[arg(long, default_value_t = 0)]
	pub threads: u32,

	/// Widen the LZMA unpacked-length field to 64 bits on write.
	#[arg(long)]
	pub lzma_long_unpacked_length: bool,
}
