use miette::IntoDiagnostic;
use sc::{options::CompressOptions, Signature};
use sc_image::AstcImage;
use sc_stream::FileStream;
use tracing::{info, warn};

use crate::args::{CompressArgs, Container, Format, Method};

pub(crate) fn compress(args: CompressArgs) -> miette::Result<()> {
	if args.image_vertical_flip || args.image_save_mips {
		warn!("--image-vertical-flip/--image-save-mips are wired through but have no effect on pixel data");
	}

	let mut input = FileStream::open_read(&args.input).into_diagnostic()?;
	let mut output = FileStream::create(&args.output).into_diagnostic()?;

	match args.container {
		Container::None => {
			info!("writing payload without a container");
			sc_stream::copy(&mut input, &mut output).into_diagnostic()?;
		}
		Container::Sc => {
			let options = CompressOptions {
				signature: signature_of(args.method)?,
				write_assets: args.write_assets,
				threads: args.threads,
				lzma_long_unpacked_length: args.lzma_long_unpacked_length,
			};
			info!(signature = ?options.signature, "compressing SC container");
			sc::compress(&mut input, &mut output, &options).into_diagnostic()?;
		}
		Container::Astc => {
			if args.format != Format::Image {
				return Err(miette::miette!(
					"--container astc requires --format image"
				));
			}
			info!("validating ASTC container framing");
			let data = sc_stream::read_all(&mut input).into_diagnostic()?;
			let image = AstcImage::from_bytes(&data).into_diagnostic()?;
			sc_stream::write_all(&mut output, &image.to_bytes()).into_diagnostic()?;
		}
	}

	Ok(())
}

pub(crate) fn signature_of(method: Method) -> miette::Result<Signature> {
	match method {
		Method::Lzma => Ok(Signature::Lzma),
		Method::Zstd => Ok(Signature::Zstandard),
		Method::Lzham => Ok(Signature::Lzham),
		Method::Astc => Err(miette::miette!(
			"--method astc is not a valid SC inner codec; use --container astc instead"
		)),
	}
}
