//! Command-line configuration surface.
//!
//! A thin `clap`-derived layer over the library's public API: two modes
//! (`lsb`, `watermark`), each with `embed`/`extract` operations. Flags are
//! validated once at parse time, the way the teacher crate validates
//! `--output`/`--raw` mutual exclusivity.

pub mod lsb;
pub mod watermark;

use clap::{Parser, Subcommand};

use self::lsb::{LsbEmbedArgs, LsbExtractArgs};
use self::watermark::{WatermarkEmbedArgs, WatermarkExtractArgs};

#[derive(Parser)]
#[command(name = "stegoforensics")]
#[command(version)]
#[command(about = "Keyed LSB text steganography and DCT watermarking for forensic image analysis")]
#[command(after_help = "Examples:
    # Hide a message in image.png, keyed by a shared secret
    stegoforensics lsb embed -i image.png -k secret -m \"hello\" -o stego.png

    # Recover it
    stegoforensics lsb extract -i stego.png -k secret

    # Hide a watermark image in a colour host
    stegoforensics watermark embed -i host.png -w mark.png -k secret -o stego.png

    # Recover the watermark
    stegoforensics watermark extract -i stego.png -k secret -o recovered.png")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Spatial LSB text steganography
    #[command(subcommand)]
    Lsb(LsbCommand),
    /// DCT-block binary watermark embedding
    #[command(subcommand)]
    Watermark(WatermarkCommand),
}

#[derive(Subcommand)]
pub enum LsbCommand {
    /// Hide a message in a cover image
    Embed(LsbEmbedArgs),
    /// Recover a hidden message from a stego image
    Extract(LsbExtractArgs),
}

#[derive(Subcommand)]
pub enum WatermarkCommand {
    /// Hide a watermark image in a colour host
    Embed(WatermarkEmbedArgs),
    /// Recover a hidden watermark from a stego host
    Extract(WatermarkExtractArgs),
}

impl Cli {
    /// Parses arguments, exiting the process with clap's usage message on
    /// failure (clap's standard behaviour via `Parser::parse`).
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
