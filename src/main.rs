mod cli;

use anyhow::{Context, Result};
use std::fs;

use crate::cli::{Cli, Command, LsbCommand, WatermarkCommand};

fn run_lsb(command: LsbCommand) -> Result<()> {
    match command {
        LsbCommand::Embed(args) => {
            let message = args.read_message()?;
            let stego = stegoforensics::embed_lsb_from_file(&args.input, args.key.as_bytes(), &message)
                .with_context(|| format!("failed to embed message into '{}'", args.input.display()))?;
            fs::write(&args.output, &stego)
                .with_context(|| format!("failed to write output file '{}'", args.output.display()))?;
            println!("Message embedded. Output written to: {}", args.output.display());
        }
        LsbCommand::Extract(args) => {
            let message = stegoforensics::extract_lsb_from_file(&args.input, args.key.as_bytes())
                .with_context(|| format!("failed to extract message from '{}'", args.input.display()))?;
            let text = String::from_utf8_lossy(&message);
            println!("{text}");
        }
    }
    Ok(())
}

fn run_watermark(command: WatermarkCommand) -> Result<()> {
    match command {
        WatermarkCommand::Embed(args) => {
            let stego = stegoforensics::embed_watermark_from_file(&args.host, &args.watermark, args.key.as_bytes())
                .with_context(|| format!("failed to embed watermark into '{}'", args.host.display()))?;
            fs::write(&args.output, &stego)
                .with_context(|| format!("failed to write output file '{}'", args.output.display()))?;
            println!("Watermark embedded. Output written to: {}", args.output.display());
        }
        WatermarkCommand::Extract(args) => {
            let watermark = stegoforensics::extract_watermark_from_file(&args.input, args.key.as_bytes())
                .with_context(|| format!("failed to extract watermark from '{}'", args.input.display()))?;
            fs::write(&args.output, &watermark)
                .with_context(|| format!("failed to write output file '{}'", args.output.display()))?;
            println!("Watermark recovered. Output written to: {}", args.output.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "log")]
    env_logger::init();

    let cli = Cli::parse_args();
    match cli.command {
        Command::Lsb(command) => run_lsb(command),
        Command::Watermark(command) => run_watermark(command),
    }
}
