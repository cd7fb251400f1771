//! DCT-block watermark embedding and extraction.
//!
//! A `100 × 100` binary watermark is hidden in the luminance plane of a
//! colour host image by perturbing one mid-frequency DCT coefficient per
//! non-overlapping 8×8 block. The blocks visited, and the order they are
//! visited in, are determined by the same keyed permutation the LSB codec
//! uses, applied to the `128 × 128` block grid of a `1024 × 1024` resized
//! host.

mod dct;

use crate::error::StegoError;
use crate::key_schedule::permute;
use crate::raster::Raster;
use dct::{forward_dct2, inverse_dct3, BLOCK_SIZE};

/// Host canvas edge length the watermark codec always resizes to before
/// processing, and resizes back from afterward.
const HOST_SIZE: usize = 1024;

/// Watermark edge length (both before embedding and after extraction).
const WATERMARK_SIZE: usize = 100;

/// Blocks per host edge: `HOST_SIZE / BLOCK_SIZE`.
const BLOCKS_PER_EDGE: usize = HOST_SIZE / BLOCK_SIZE;

/// Row/column of the coefficient each block carries one watermark bit in.
const COEFF_ROW: usize = 2;
const COEFF_COL: usize = 2;

/// Magnitude of the perturbation applied to the carrier coefficient.
const FACT: f64 = 16.0;

/// Number of watermark bits, and the number of blocks consumed to carry
/// them (`WATERMARK_SIZE * WATERMARK_SIZE`).
const WATERMARK_BITS: usize = WATERMARK_SIZE * WATERMARK_SIZE;

/// Binarizes `watermark` (grayscale conversion, bicubic resize to
/// `100 × 100`, threshold at 128) and embeds it into `host`'s luminance
/// plane under `key`. Returns a stego raster with `host`'s original shape.
pub fn embed_watermark(host: &Raster, watermark: &Raster, key: &[u8]) -> Result<Raster, StegoError> {
    if key.is_empty() {
        return Err(StegoError::EmptyKey);
    }
    if host.channels() != 3 {
        return Err(StegoError::NonColourHost);
    }

    let bits = binarize_watermark(watermark)?;

    let original_height = host.height();
    let original_width = host.width();
    let resized_host = host.resize(HOST_SIZE, HOST_SIZE)?;
    let (mut y_plane, u_plane, v_plane) = resized_host.bgr_to_yuv_planes()?;

    let block_order = permute(key, BLOCKS_PER_EDGE);

    let mut index = 0usize;
    'outer: for &bi in &block_order {
        for &bj in &block_order {
            if index >= WATERMARK_BITS {
                break 'outer;
            }
            let bit = bits[index];
            embed_block(&mut y_plane, HOST_SIZE, bi, bj, bit);
            index += 1;
        }
    }

    let stego_1024 = Raster::yuv_planes_to_bgr(HOST_SIZE, HOST_SIZE, &y_plane, &u_plane, &v_plane)?;
    stego_1024.resize(original_height, original_width)
}

/// Extracts a `100 × 100` binary watermark from `stego_host` under `key`.
/// Produces garbage (not an error) when `key` is wrong, matching the DCT
/// scheme's lack of an authenticity check.
pub fn extract_watermark(stego_host: &Raster, key: &[u8]) -> Result<Raster, StegoError> {
    if key.is_empty() {
        return Err(StegoError::EmptyKey);
    }
    if stego_host.channels() != 3 {
        return Err(StegoError::NonColourHost);
    }

    let resized = stego_host.resize(HOST_SIZE, HOST_SIZE)?;
    let (y_plane, _u, _v) = resized.bgr_to_yuv_planes()?;

    let block_order = permute(key, BLOCKS_PER_EDGE);

    let mut bits = vec![0u8; WATERMARK_BITS];
    let mut index = 0usize;
    'outer: for &bi in &block_order {
        for &bj in &block_order {
            if index >= WATERMARK_BITS {
                break 'outer;
            }
            bits[index] = extract_block_bit(&y_plane, HOST_SIZE, bi, bj);
            index += 1;
        }
    }

    let data: Vec<u8> = bits.into_iter().map(|b| if b == 0 { 0u8 } else { 255u8 }).collect();
    Raster::new(data, WATERMARK_SIZE, WATERMARK_SIZE, 1)
}

/// Converts `watermark` to the 10 000-bit vector described in the data
/// model: grayscale, bicubic resize to `100 × 100`, threshold at 128.
fn binarize_watermark(watermark: &Raster) -> Result<Vec<u8>, StegoError> {
    let gray = watermark
        .to_grayscale()
        .map_err(|_| StegoError::InvalidWatermark)?;
    let resized = gray
        .resize(WATERMARK_SIZE, WATERMARK_SIZE)
        .map_err(|_| StegoError::InvalidWatermark)?;
    let thresholded = resized
        .threshold_binary(128)
        .map_err(|_| StegoError::InvalidWatermark)?;
    Ok(thresholded
        .as_bytes()
        .iter()
        .map(|&v| if v >= 128 { 1u8 } else { 0u8 })
        .collect())
}

fn read_block(plane: &[u8], edge: usize, bi: usize, bj: usize) -> [[f64; BLOCK_SIZE]; BLOCK_SIZE] {
    let mut block = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
    for (r, row) in block.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            let row_idx = bi * BLOCK_SIZE + r;
            let col_idx = bj * BLOCK_SIZE + c;
            *slot = plane[row_idx * edge + col_idx] as f64;
        }
    }
    block
}

fn write_block(plane: &mut [u8], edge: usize, bi: usize, bj: usize, block: &[[f64; BLOCK_SIZE]; BLOCK_SIZE]) {
    for (r, row) in block.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let row_idx = bi * BLOCK_SIZE + r;
            let col_idx = bj * BLOCK_SIZE + c;
            plane[row_idx * edge + col_idx] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
}

fn embed_block(plane: &mut [u8], edge: usize, bi: usize, bj: usize, bit: u8) {
    let block = read_block(plane, edge, bi, bj);
    let mut coeffs = forward_dct2(&block);
    if bit == 0 {
        coeffs[COEFF_ROW][COEFF_COL] += FACT;
    } else {
        coeffs[COEFF_ROW][COEFF_COL] -= FACT;
    }
    let spatial = inverse_dct3(&coeffs);
    write_block(plane, edge, bi, bj, &spatial);
}

fn extract_block_bit(plane: &[u8], edge: usize, bi: usize, bj: usize) -> u8 {
    let block = read_block(plane, edge, bi, bj);
    let coeffs = forward_dct2(&block);
    if coeffs[COEFF_ROW][COEFF_COL] >= 0.0 {
        0
    } else {
        1
    }
}
