//! # Error types for forensic steganography operations
//!
//! This module defines the error types returned by every fallible entry point
//! in the crate: the key schedule, the spatial LSB codec, the DCT watermark
//! codec, and the image adapter that sits in front of both. Errors are always
//! returned as values — the core never panics or aborts on well-formed input.

use std::io;
use thiserror::Error;

/// Comprehensive error type for all steganography and watermarking operations.
///
/// # Error Categories
///
/// - **Argument errors** — [`EmptyKey`](StegoError::EmptyKey),
///   [`MessageTooLong`](StegoError::MessageTooLong),
///   [`UnsupportedShape`](StegoError::UnsupportedShape)
/// - **Capacity errors** — [`CapacityExceeded`](StegoError::CapacityExceeded)
/// - **Extraction errors** — [`ExtractFailed`](StegoError::ExtractFailed)
/// - **Image I/O errors** — [`ImageDecoding`](StegoError::ImageDecoding),
///   [`ImageEncoding`](StegoError::ImageEncoding), [`FileIo`](StegoError::FileIo)
#[derive(Error, Debug)]
pub enum StegoError {
    /// The secret key was empty.
    ///
    /// The key schedule requires at least one byte of key material; an empty
    /// key has no `key_byte(i mod |K|)` to read.
    #[error("secret key must not be empty")]
    EmptyKey,

    /// The message exceeds the 2048-character hard limit enforced at the
    /// adapter boundary, before the sentinel is even considered.
    #[error("message exceeds the 2048 character limit")]
    MessageTooLong,

    /// The raster is neither 2-D (grayscale) nor 3-D with exactly 3 channels
    /// (BGR).
    #[error("unsupported raster shape: expected (h, w) or (h, w, 3)")]
    UnsupportedShape,

    /// The payload plus sentinel does not fit in the available pixel
    /// capacity of the image.
    #[error("payload does not fit: need {needed} bits, have {available} pixel slots")]
    CapacityExceeded {
        /// Bits required for the message plus sentinel.
        needed: usize,
        /// Pixel (or pixel-channel) slots available to embed into.
        available: usize,
    },

    /// LSB extraction consumed more than `8 * 2048 + 48` bits without
    /// matching the sentinel. This is deliberately the same error whether
    /// the key is wrong or the image simply carries no payload, so that
    /// extraction never leaks a key-correctness oracle.
    #[error("no payload recovered: wrong key, or image carries no message")]
    ExtractFailed,

    /// The watermark image could not be treated as a single-channel image
    /// suitable for resizing and thresholding.
    #[error("watermark image is not resizable to a square binary image")]
    InvalidWatermark,

    /// The host image for watermark embedding must be a 3-channel (colour)
    /// raster.
    #[error("watermark host image must be a 3-channel colour raster")]
    NonColourHost,

    /// Decoding or encoding an image container (PNG/JPEG) failed.
    #[error("image codec error: {0}")]
    ImageCodec(#[from] image::ImageError),

    /// A general file I/O failure while reading or writing image bytes.
    #[error("file I/O failed")]
    FileIo(#[from] io::Error),

    /// An invariant the core relies on was violated by a code path that
    /// should be unreachable on well-formed input (e.g. a raster/permutation
    /// length mismatch computed internally).
    #[error("internal error: {message}")]
    Internal {
        /// Diagnostic detail, not meant to be parsed by callers.
        message: String,
    },
}
