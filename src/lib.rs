//! # stegoforensics — keyed LSB steganography and DCT watermarking
//!
//! This crate implements two image data-hiding schemes used by forensic
//! image-analysis tooling:
//!
//! - A **spatial LSB codec** ([`embed_lsb`]/[`extract_lsb`]) that hides an
//!   ASCII message in the parities of pixel components.
//! - A **DCT-block watermark codec** ([`embed_watermark`]/[`extract_watermark`])
//!   that hides a small binary watermark image by perturbing one frequency
//!   coefficient per 8×8 luminance block.
//!
//! Both schemes visit pixels (or blocks) in an order derived from a shared
//! secret key via [`key_schedule::permute`] — a deterministic shuffle, not a
//! cipher. Neither scheme provides confidentiality or tamper-evidence on its
//! own; they provide *plausible deniability and recoverability* of hidden
//! content to a holder of the key.
//!
//! ## Quick start
//!
//! ```no_run
//! use stegoforensics::{embed_lsb_from_bytes, extract_lsb_from_bytes};
//!
//! # fn main() -> Result<(), stegoforensics::StegoError> {
//! let cover_png = std::fs::read("cover.png").unwrap();
//! let stego_png = embed_lsb_from_bytes(&cover_png, b"shared-secret", b"hello")?;
//! std::fs::write("stego.png", &stego_png).unwrap();
//!
//! let message = extract_lsb_from_bytes(&stego_png, b"shared-secret")?;
//! assert_eq!(message, b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Key properties and caveats
//!
//! - [`embed_lsb`] rejects a message that would not fit the carrier exactly;
//!   it does not silently truncate.
//! - A message that itself contains the literal bytes `##EE##` truncates on
//!   extraction — see [`embed_lsb`]'s documentation.
//! - [`extract_lsb`] never distinguishes "wrong key" from "no payload
//!   present"; both return [`StegoError::ExtractFailed`].
//! - [`extract_watermark`] never errors on a wrong key — it returns a
//!   watermark-shaped image that is simply unrelated noise.

pub mod error;
pub mod io;
pub mod key_schedule;
pub mod lsb;
pub mod raster;
pub mod watermark;

pub use error::StegoError;
pub use lsb::{embed_lsb, extract_lsb, MAX_MESSAGE_CHARS};
pub use raster::Raster;
pub use watermark::{embed_watermark, extract_watermark};

/// Embeds `message` into the PNG/JPEG-encoded image `cover_bytes` under
/// `key`, returning a newly encoded PNG.
///
/// This is the bytes-oriented convenience wrapper around [`embed_lsb`]: it
/// decodes `cover_bytes` through the image adapter, delegates to the core
/// codec, and re-encodes the result. See [`embed_lsb`] for the embedding
/// contract.
pub fn embed_lsb_from_bytes(cover_bytes: &[u8], key: &[u8], message: &[u8]) -> Result<Vec<u8>, StegoError> {
    #[cfg(feature = "log")]
    log::debug!(bytes = cover_bytes.len(), message_len = message.len(); "embedding LSB payload");
    let raster = Raster::decode(cover_bytes)?;
    let stego = embed_lsb(&raster, key, message)?;
    stego.encode_png()
}

/// Reads `cover_path`, embeds `message` under `key`, and returns the
/// resulting PNG bytes. Does not write anything back to disk — callers
/// decide where the stego image goes.
pub fn embed_lsb_from_file<P: AsRef<std::path::Path>>(
    cover_path: P,
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, StegoError> {
    let bytes = io::read_file(cover_path)?;
    embed_lsb_from_bytes(&bytes, key, message)
}

/// Extracts a message from the PNG/JPEG-encoded image `stego_bytes` under
/// `key`. Bytes-oriented convenience wrapper around [`extract_lsb`].
pub fn extract_lsb_from_bytes(stego_bytes: &[u8], key: &[u8]) -> Result<Vec<u8>, StegoError> {
    let raster = Raster::decode(stego_bytes)?;
    extract_lsb(&raster, key)
}

/// Reads `stego_path` and extracts a message under `key`.
pub fn extract_lsb_from_file<P: AsRef<std::path::Path>>(stego_path: P, key: &[u8]) -> Result<Vec<u8>, StegoError> {
    let bytes = io::read_file(stego_path)?;
    extract_lsb_from_bytes(&bytes, key)
}

/// Embeds the watermark image `watermark_bytes` into the host image
/// `host_bytes` under `key`, returning a newly encoded PNG. Both inputs are
/// decoded through the image adapter; the watermark is binarized per
/// [`embed_watermark`]'s contract.
pub fn embed_watermark_from_bytes(
    host_bytes: &[u8],
    watermark_bytes: &[u8],
    key: &[u8],
) -> Result<Vec<u8>, StegoError> {
    #[cfg(feature = "log")]
    log::debug!("embedding DCT watermark");
    let host = Raster::decode(host_bytes)?;
    let watermark = Raster::decode(watermark_bytes)?;
    let stego = embed_watermark(&host, &watermark, key)?;
    stego.encode_png()
}

/// Reads `host_path` and `watermark_path`, embeds under `key`, and returns
/// the resulting PNG bytes.
pub fn embed_watermark_from_file<P: AsRef<std::path::Path>, Q: AsRef<std::path::Path>>(
    host_path: P,
    watermark_path: Q,
    key: &[u8],
) -> Result<Vec<u8>, StegoError> {
    let host_bytes = io::read_file(host_path)?;
    let watermark_bytes = io::read_file(watermark_path)?;
    embed_watermark_from_bytes(&host_bytes, &watermark_bytes, key)
}

/// Extracts a `100×100` binary watermark from `stego_bytes` under `key`,
/// returning it encoded as a PNG.
pub fn extract_watermark_from_bytes(stego_bytes: &[u8], key: &[u8]) -> Result<Vec<u8>, StegoError> {
    let host = Raster::decode(stego_bytes)?;
    let watermark = extract_watermark(&host, key)?;
    watermark.encode_png()
}

/// Reads `stego_path` and extracts the embedded watermark under `key`,
/// returning it encoded as a PNG.
pub fn extract_watermark_from_file<P: AsRef<std::path::Path>>(
    stego_path: P,
    key: &[u8],
) -> Result<Vec<u8>, StegoError> {
    let bytes = io::read_file(stego_path)?;
    extract_watermark_from_bytes(&bytes, key)
}
