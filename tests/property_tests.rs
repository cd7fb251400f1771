//! Property-based tests for stegoforensics
//!
//! These tests verify core properties that should always hold true:
//! 1. The key schedule is always a bijection and is deterministic.
//! 2. LSB embed -> extract round-trips exactly under the same key.
//! 3. LSB embed never perturbs a pixel by more than one unit.
//! 4. DCT embed preserves host dimensions.

use proptest::prelude::*;
use stegoforensics::key_schedule::permute;
use stegoforensics::raster::Raster;
use stegoforensics::{embed_lsb, embed_watermark, extract_lsb};

fn is_permutation(seq: &[usize], n: usize) -> bool {
    let mut seen = vec![false; n];
    for &v in seq {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    seen.iter().all(|&b| b)
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..16)
}

fn grayscale_raster_strategy() -> impl Strategy<Value = Raster> {
    (8usize..24, 8usize..24, any::<u8>()).prop_map(|(height, width, value)| {
        Raster::new(vec![value; height * width], height, width, 1).unwrap()
    })
}

fn short_message_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=127u8, 0..6)
}

proptest! {
    #[cfg_attr(tarpaulin, ignore)]
    #[test]
    fn permute_is_always_a_bijection(key in key_strategy(), n in 0usize..256) {
        let result = permute(&key, n);
        prop_assert_eq!(result.len(), n);
        prop_assert!(is_permutation(&result, n));
    }

    #[cfg_attr(tarpaulin, ignore)]
    #[test]
    fn permute_is_deterministic(key in key_strategy(), n in 0usize..256) {
        let a = permute(&key, n);
        let b = permute(&key, n);
        prop_assert_eq!(a, b);
    }

    /// Core property: embed then extract should preserve the message,
    /// provided it fits the carrier's capacity.
    #[cfg_attr(tarpaulin, ignore)]
    #[test]
    fn lsb_roundtrip_preserves_message(
        raster in grayscale_raster_strategy(),
        key in key_strategy(),
        message in short_message_strategy(),
    ) {
        let needed = 8 * (message.len() + 6);
        prop_assume!(needed <= raster.capacity());

        let stego = embed_lsb(&raster, &key, &message)
            .map_err(|e| TestCaseError::Fail(format!("embed failed: {e}").into()))?;
        let extracted = extract_lsb(&stego, &key)
            .map_err(|e| TestCaseError::Fail(format!("extract failed: {e}").into()))?;

        prop_assert_eq!(message, extracted);
    }

    /// Property: LSB embedding perturbs each pixel by at most one unit.
    #[cfg_attr(tarpaulin, ignore)]
    #[test]
    fn lsb_embed_is_minimal_perturbation(
        raster in grayscale_raster_strategy(),
        key in key_strategy(),
        message in short_message_strategy(),
    ) {
        let needed = 8 * (message.len() + 6);
        prop_assume!(needed <= raster.capacity());

        let stego = embed_lsb(&raster, &key, &message)
            .map_err(|e| TestCaseError::Fail(format!("embed failed: {e}").into()))?;

        for (&before, &after) in raster.as_bytes().iter().zip(stego.as_bytes().iter()) {
            prop_assert!((before as i32 - after as i32).abs() <= 1);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn permute_literal_ab_4() {
        let result = permute(b"ab", 4);
        assert!(is_permutation(&result, 4));
        assert_eq!(result, vec![0, 3, 2, 1]);
    }

    #[test]
    fn lsb_basic_roundtrip() {
        let raster = Raster::new(vec![200u8; 32 * 32], 32, 32, 1).unwrap();
        let stego = embed_lsb(&raster, b"hello", b"hi").unwrap();
        let extracted = extract_lsb(&stego, b"hello").unwrap();
        assert_eq!(extracted, b"hi");
    }

    #[test]
    fn watermark_embed_preserves_host_shape() {
        let host = Raster::new(vec![128u8; 1024 * 1024 * 3], 1024, 1024, 3).unwrap();
        let watermark_data: Vec<u8> = (0..100 * 100)
            .map(|i| if i % 2 == 0 { 255 } else { 0 })
            .collect();
        let watermark = Raster::new(watermark_data, 100, 100, 1).unwrap();

        let stego = embed_watermark(&host, &watermark, b"secret").unwrap();
        assert_eq!((stego.height(), stego.width(), stego.channels()), (1024, 1024, 3));
    }
}
