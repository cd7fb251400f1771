//! `watermark` subcommand: DCT-block binary watermark embedding.

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct WatermarkEmbedArgs {
    /// Colour host image to embed the watermark into
    #[arg(short = 'i', long, value_name = "FILE")]
    pub host: PathBuf,

    /// Binary (or binarizable) watermark image
    #[arg(short, long, value_name = "FILE")]
    pub watermark: PathBuf,

    /// Secret key shared with whoever will extract the watermark
    #[arg(short, long)]
    pub key: String,

    /// Output PNG file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct WatermarkExtractArgs {
    /// Stego host image to extract the watermark from
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Secret key the watermark was embedded with
    #[arg(short, long)]
    pub key: String,

    /// Output PNG file for the recovered 100x100 watermark
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}
