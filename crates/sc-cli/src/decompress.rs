use miette::IntoDiagnostic;
use sc_stream::FileStream;
use tracing::{info, warn};

use crate::args::DecompressArgs;

pub(crate) fn decompress(args: DecompressArgs) -> miette::Result<()> {
	if args.image_vertical_flip || args.image_save_mips {
		warn!("--image-vertical-flip/--image-save-mips are wired through but have no effect on pixel data");
	}

	let mut input = FileStream::open_read(&args.input).into_diagnostic()?;
	let mut output = FileStream::create(&args.output).into_diagnostic()?;

	info!("decompressing SC container");
	let result = sc::decompress(&mut input, &mut output, args.print_sc_metadata).into_diagnostic()?;

	if args.print_sc_metadata {
		if result.metadata.is_empty() {
			println!("no assets recorded in metadata trailer");
		}
		for asset in &result.metadata {
			let name = asset.name.as_deref().unwrap_or("<unnamed>");
			let hash = asset
				.hash
				.as_ref()
				.map(|h| h.iter().map(|b| format!("{b:02x}")).collect::<String>())
				.unwrap_or_else(|| "<no hash>".to_string());
			println!("{name}  {hash}");
		}
	}

	Ok(())
}
