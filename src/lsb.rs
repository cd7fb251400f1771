//! Spatial LSB text steganography.
//!
//! Hides an ASCII message in the parities of a raster's pixel components,
//! visited in the order produced by [`crate::key_schedule::permute`]. The
//! message is terminated by the fixed sentinel `##EE##` rather than a length
//! prefix, so extraction has to look for that marker rather than trust a
//! count baked into the stego image itself.
//!
//! A message containing the sentinel bytes verbatim will be truncated at the
//! first occurrence on extraction — this is a known limitation inherited
//! from the scheme, not a bug in this implementation.

use crate::error::StegoError;
use crate::key_schedule::permute;
use crate::raster::Raster;

/// Marks the end of an embedded message.
const SENTINEL: &[u8; 6] = b"##EE##";

/// Hard limit on message length, enforced before any capacity arithmetic.
pub const MAX_MESSAGE_CHARS: usize = 2048;

const SENTINEL_BITS: usize = SENTINEL.len() * 8;

/// Embeds `message` into `raster` under `key`, returning a new raster of
/// identical shape.
///
/// `raster` must be grayscale (`channels == 1`) or colour (`channels == 3`);
/// any other shape is rejected. `message` must not exceed
/// [`MAX_MESSAGE_CHARS`] characters, and the raster must have enough
/// pixel-channel slots for `message` plus the 6-byte sentinel: exactly
/// filling capacity is allowed, matching the bit for bit.
///
/// A message that itself contains the literal bytes `##EE##` will cause
/// extraction to stop early at the first occurrence, not at the sentinel
/// this function appends.
pub fn embed_lsb(raster: &Raster, key: &[u8], message: &[u8]) -> Result<Raster, StegoError> {
    if key.is_empty() {
        return Err(StegoError::EmptyKey);
    }
    if message.len() > MAX_MESSAGE_CHARS {
        return Err(StegoError::MessageTooLong);
    }
    if raster.channels() != 1 && raster.channels() != 3 {
        return Err(StegoError::UnsupportedShape);
    }

    let needed = 8 * (message.len() + SENTINEL.len());
    let available = raster.capacity();
    if needed > available {
        return Err(StegoError::CapacityExceeded {
            needed,
            available,
        });
    }

    let mut out = raster.clone();
    let coords = CoordWalk::new(raster, key);

    let mut bits = BitSource::new(message);
    for (row, col, channel) in coords {
        let Some(bit) = bits.next_bit() else {
            break;
        };
        let value = out.get(row, col, channel);
        let flipped = match (bit, value % 2) {
            (0, 1) => value - 1,
            (1, 0) => value + 1,
            _ => value,
        };
        out.set(row, col, channel, flipped);
    }

    Ok(out)
}

/// Extracts a message previously embedded with [`embed_lsb`] under the same
/// `key`.
///
/// Returns [`StegoError::ExtractFailed`] if no sentinel is found within
/// `8 * MAX_MESSAGE_CHARS + 48` bits of traversal — the same error whether
/// `key` is wrong or `raster` simply carries no payload, so a caller cannot
/// use extraction as a key-correctness oracle.
pub fn extract_lsb(raster: &Raster, key: &[u8]) -> Result<Vec<u8>, StegoError> {
    if key.is_empty() {
        return Err(StegoError::EmptyKey);
    }
    if raster.channels() != 1 && raster.channels() != 3 {
        return Err(StegoError::UnsupportedShape);
    }

    let max_bits = 8 * MAX_MESSAGE_CHARS + SENTINEL_BITS;
    let mut window = RollingWindow::new();
    let mut bytes = Vec::new();
    let mut current_byte = 0u8;
    let mut bit_in_byte = 0usize;
    let mut total_bits = 0usize;

    for (row, col, channel) in CoordWalk::new(raster, key) {
        if total_bits >= max_bits {
            break;
        }
        let value = raster.get(row, col, channel);
        let bit = value % 2;
        total_bits += 1;

        current_byte = (current_byte << 1) | bit;
        bit_in_byte += 1;
        if bit_in_byte == 8 {
            bytes.push(current_byte);
            current_byte = 0;
            bit_in_byte = 0;
        }

        window.push(bit);
        if window.matches_sentinel() {
            let sentinel_bytes = SENTINEL.len();
            if bytes.len() >= sentinel_bytes {
                bytes.truncate(bytes.len() - sentinel_bytes);
            }
            return Ok(bytes);
        }
    }

    Err(StegoError::ExtractFailed)
}

/// Precomputed coordinate order shared by embed and extract.
struct CoordWalk {
    px: Vec<usize>,
    py: Vec<usize>,
    pz: Vec<usize>,
    i: usize,
    j: usize,
    k: usize,
}

impl CoordWalk {
    fn new(raster: &Raster, key: &[u8]) -> Self {
        let px = permute(key, raster.height());
        let py = permute(key, raster.width());
        let pz = if raster.channels() == 3 {
            permute(key, 3)
        } else {
            vec![0]
        };
        Self {
            px,
            py,
            pz,
            i: 0,
            j: 0,
            k: 0,
        }
    }
}

impl Iterator for CoordWalk {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.px.len() {
            return None;
        }
        let row = self.px[self.i];
        let col = self.py[self.j];
        let channel = self.pz[self.k];

        self.k += 1;
        if self.k >= self.pz.len() {
            self.k = 0;
            self.j += 1;
            if self.j >= self.py.len() {
                self.j = 0;
                self.i += 1;
            }
        }

        Some((row, col, channel))
    }
}

/// Yields the MSB-first bitstream of `message` followed by the sentinel.
struct BitSource<'a> {
    message: &'a [u8],
    byte_index: usize,
    bit_index: usize,
    in_sentinel: bool,
}

impl<'a> BitSource<'a> {
    fn new(message: &'a [u8]) -> Self {
        Self {
            message,
            byte_index: 0,
            bit_index: 0,
            in_sentinel: false,
        }
    }

    fn next_bit(&mut self) -> Option<u8> {
        loop {
            let source: &[u8] = if self.in_sentinel { SENTINEL } else { self.message };
            if self.byte_index >= source.len() {
                if self.in_sentinel {
                    return None;
                }
                self.in_sentinel = true;
                self.byte_index = 0;
                self.bit_index = 0;
                continue;
            }
            let byte = source[self.byte_index];
            let bit = (byte >> (7 - self.bit_index)) & 1;
            self.bit_index += 1;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.byte_index += 1;
            }
            return Some(bit);
        }
    }
}

/// A rolling 64-bit window used to detect the sentinel without building up a
/// growing bit string.
struct RollingWindow {
    bits: u64,
    sentinel_pattern: u64,
}

impl RollingWindow {
    fn new() -> Self {
        let mut pattern = 0u64;
        for &byte in SENTINEL {
            pattern = (pattern << 8) | byte as u64;
        }
        Self {
            bits: 0,
            sentinel_pattern: pattern,
        }
    }

    fn push(&mut self, bit: u8) {
        self.bits = (self.bits << 1) | bit as u64;
    }

    fn matches_sentinel(&self) -> bool {
        let mask = (1u64 << SENTINEL_BITS) - 1;
        (self.bits & mask) == self.sentinel_pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_raster(height: usize, width: usize, channels: usize, value: u8) -> Raster {
        Raster::new(vec![value; height * width * channels], height, width, channels).unwrap()
    }

    #[test]
    fn round_trip_grayscale_message() {
        let raster = solid_raster(32, 32, 1, 200);
        let stego = embed_lsb(&raster, b"hello", b"hi").unwrap();

        let mut diff_count = 0;
        for (&a, &b) in raster.as_bytes().iter().zip(stego.as_bytes().iter()) {
            if a != b {
                assert!((a as i32 - b as i32).abs() == 1);
                diff_count += 1;
            }
        }
        assert!(diff_count <= 8 * (2 + 6));

        let recovered = extract_lsb(&stego, b"hello").unwrap();
        assert_eq!(recovered, b"hi");
    }

    #[test]
    fn wrong_key_fails_to_extract() {
        let raster = solid_raster(32, 32, 1, 200);
        let stego = embed_lsb(&raster, b"hello", b"hi").unwrap();
        let result = extract_lsb(&stego, b"world");
        assert!(matches!(result, Err(StegoError::ExtractFailed)));
    }

    #[test]
    fn capacity_boundary_exact_fit_succeeds_one_more_fails() {
        // 8x8 grayscale: capacity = 64 bits. Sentinel alone is 48 bits,
        // leaving 16 bits = 2 characters exactly.
        let raster = solid_raster(8, 8, 1, 100);
        let ok = embed_lsb(&raster, b"k", b"hi");
        assert!(ok.is_ok());

        let too_big = embed_lsb(&raster, b"k", b"hey");
        assert!(matches!(too_big, Err(StegoError::CapacityExceeded { .. })));
    }

    #[test]
    fn colour_round_trip() {
        let raster = solid_raster(4, 4, 3, 128);
        // capacity = 4*4*3 = 48 bits; "A" + sentinel = 8*(1+6) = 56 bits > 48.
        let result = embed_lsb(&raster, b"K", b"A");
        assert!(matches!(result, Err(StegoError::CapacityExceeded { .. })));

        let bigger = solid_raster(6, 6, 3, 128);
        let stego = embed_lsb(&bigger, b"K", b"A").unwrap();
        let recovered = extract_lsb(&stego, b"K").unwrap();
        assert_eq!(recovered, b"A");
    }

    #[test]
    fn empty_key_is_rejected() {
        let raster = solid_raster(8, 8, 1, 10);
        assert!(matches!(embed_lsb(&raster, b"", b"hi"), Err(StegoError::EmptyKey)));
        assert!(matches!(extract_lsb(&raster, b""), Err(StegoError::EmptyKey)));
    }

    #[test]
    fn message_too_long_is_rejected() {
        let raster = solid_raster(4, 4, 1, 10);
        let message = vec![b'a'; MAX_MESSAGE_CHARS + 1];
        assert!(matches!(
            embed_lsb(&raster, b"k", &message),
            Err(StegoError::MessageTooLong)
        ));
    }

    #[test]
    fn no_payload_yields_extract_failed_not_empty_message() {
        let raster = solid_raster(16, 16, 1, 7);
        let result = extract_lsb(&raster, b"anykey");
        assert!(matches!(result, Err(StegoError::ExtractFailed)));
    }
}
