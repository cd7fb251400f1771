//! `lsb` subcommand: spatial LSB text steganography.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct LsbEmbedArgs {
    /// Cover image to embed the message into
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Secret key shared with whoever will extract the message
    #[arg(short, long)]
    pub key: String,

    /// Message to hide. Mutually exclusive with --message-file.
    #[arg(short, long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// File whose contents are the message to hide.
    #[arg(long, value_name = "FILE")]
    pub message_file: Option<PathBuf>,

    /// Output PNG file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

impl LsbEmbedArgs {
    pub fn read_message(&self) -> Result<Vec<u8>> {
        match (&self.message, &self.message_file) {
            (Some(message), None) => Ok(message.clone().into_bytes()),
            (None, Some(path)) => {
                std::fs::read(path).with_context(|| format!("failed to read message file '{}'", path.display()))
            }
            _ => anyhow::bail!("specify exactly one of --message or --message-file"),
        }
    }
}

#[derive(Debug, Args)]
pub struct LsbExtractArgs {
    /// Stego image to extract the message from
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Secret key the message was embedded with
    #[arg(short, long)]
    pub key: String,
}
