use miette::IntoDiagnostic;
use sc::options::CompressOptions;
use sc_stream::MemoryStream;
use tracing::info;

use crate::{args::ConvertArgs, compress::signature_of};

/// Decompress the input, then recompress it with the requested outer container and method.
///
/// This is a thin pipeline: `decompress` into memory, then `compress` back out, matching how the
/// original CLI's `Operations::Convert` is just those two steps chained.
pub(crate) fn convert(args: ConvertArgs) -> miette::Result<()> {
	let mut input = sc_stream::FileStream::open_read(&args.input).into_diagnostic()?;
	let mut output = sc_stream::FileStream::create(&args.output).into_diagnostic()?;

	info!("decompressing input for conversion");
	let mut plaintext = MemoryStream::new();
	sc::decompress(&mut input, &mut plaintext, false).into_diagnostic()?;

	let mut plaintext = MemoryStream::from_vec(plaintext.into_inner());

	match args.container {
		crate::args::Container::None => {
			sc_stream::copy(&mut plaintext, &mut output).into_diagnostic()?;
		}
		crate::args::Container::Sc => {
			let options = CompressOptions {
				signature: signature_of(args.method)?,
				write_assets: false,
				threads: args.threads,
				lzma_long_unpacked_length: args.lzma_long_unpacked_length,
			};
			info!(signature = ?options.signature, "recompressing SC container");
			sc::compress(&mut plaintext, &mut output, &options).into_diagnostic()?;
		}
		crate::args::Container::Astc => {
			let data = sc_stream::read_all(&mut plaintext).into_diagnostic()?;
			let image = sc_image::AstcImage::from_bytes(&data).into_diagnostic()?;
			sc_stream::write_all(&mut output, &image.to_bytes()).into_diagnostic()?;
		}
	}

	Ok(())
}
