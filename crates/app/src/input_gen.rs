//! Frame and error-position generation for analysis runs.
//!
//! When no frame is given on the command line, we generate a CAN 2.0A
//! (base format) data frame segment from Start-of-Frame through the data
//! field:
//!
//! ```text
//! | SOF | identifier (11) | RTR | IDE | r0 | DLC (4) | data (8 * DLC) |
//! |  0  |     random      |  0  |  0  |  0 |  0..=8  |     random     |
//! ```
//!
//! Optionally the CRC trailer is appended so the frame looks as received.
//! All randomness comes from a seeded ChaCha8 RNG; the same seed always
//! yields the same frame and positions.

use crc_sim_core::crc::crc_remainder;
use crc_sim_core::{BitSeq, Error, FrameLayout, Polynomial, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Identifier width of a base-format CAN frame
const IDENTIFIER_BITS: usize = 11;

/// Largest classic CAN data length code
pub const MAX_DLC: usize = 8;

/// Append the lowest `count` bits of `value`, most significant first.
fn push_bits(bits: &mut Vec<bool>, value: u64, count: usize) {
    for shift in (0..count).rev() {
        bits.push((value >> shift) & 1 == 1);
    }
}

/// Generate the SOF~Data segment of a base-format data frame.
///
/// `dlc` is clamped to [`MAX_DLC`].
pub fn generate_sof_to_data(rng: &mut ChaCha8Rng, dlc: usize) -> BitSeq {
    let dlc = dlc.min(MAX_DLC);
    let mut bits = Vec::with_capacity(1 + IDENTIFIER_BITS + 3 + 4 + 8 * dlc);

    // SOF is dominant
    bits.push(false);
    push_bits(&mut bits, rng.gen_range(0..1u64 << IDENTIFIER_BITS), IDENTIFIER_BITS);
    // RTR, IDE, r0: data frame, base format, reserved
    bits.extend_from_slice(&[false, false, false]);
    push_bits(&mut bits, dlc as u64, 4);
    for _ in 0..dlc {
        let byte: u8 = rng.gen();
        push_bits(&mut bits, byte as u64, 8);
    }

    BitSeq::from(bits)
}

/// Append the CRC trailer to a SOF~Data segment, producing a received frame.
///
/// The checked input is `data ++ crc_field`, so the remainder is taken over
/// `data` shifted by the full field width, not just the polynomial degree.
/// A degree below the field width leaves leading zeros in the field and the
/// frame still checks to zero.
///
/// # Errors
/// Returns `Error::LengthMismatch` if the polynomial's CRC is wider than
/// the layout's CRC field.
pub fn append_crc_trailer(data: &BitSeq, polynomial: &Polynomial, layout: &FrameLayout) -> Result<BitSeq> {
    let field = layout.crc_field_bits();
    let shift = field.checked_sub(polynomial.degree()).ok_or(Error::LengthMismatch {
        left: polynomial.degree(),
        right: field,
    })?;
    let crc = crc_remainder(&data.concat(&BitSeq::zeros(shift)), polynomial).zero_extend(field);
    layout.assemble(data, &crc)
}

/// Pick `count` random positions in `0..frame_len`, in draw order.
///
/// Duplicates are kept: each draw is an independent injection.
pub fn random_positions(rng: &mut ChaCha8Rng, frame_len: usize, count: usize) -> Vec<usize> {
    if frame_len == 0 {
        return Vec::new();
    }
    (0..count).map(|_| rng.gen_range(0..frame_len)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_frame_length_follows_dlc() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for dlc in 0..=MAX_DLC {
            let frame = generate_sof_to_data(&mut rng, dlc);
            assert_eq!(frame.len(), 19 + 8 * dlc);
        }
    }

    #[test]
    fn test_dlc_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let frame = generate_sof_to_data(&mut rng, 15);
        assert_eq!(frame.len(), 19 + 64);
        // DLC field holds 8
        assert_eq!(frame.slice(15..19).to_string(), "1000");
    }

    #[test]
    fn test_fixed_fields() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let frame = generate_sof_to_data(&mut rng, 2);
        assert_eq!(frame.get(0), Some(false));
        assert_eq!(frame.slice(12..15).to_string(), "000");
        assert_eq!(frame.slice(15..19).to_string(), "0010");
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(12345);
        let mut rng2 = ChaCha8Rng::seed_from_u64(12345);

        assert_eq!(
            generate_sof_to_data(&mut rng1, 4),
            generate_sof_to_data(&mut rng2, 4)
        );
        assert_eq!(
            random_positions(&mut rng1, 51, 10),
            random_positions(&mut rng2, 51, 10)
        );
    }

    #[test]
    fn test_random_positions_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let positions = random_positions(&mut rng, 27, 200);
        assert_eq!(positions.len(), 200);
        assert!(positions.iter().all(|&p| p < 27));
        assert!(random_positions(&mut rng, 0, 5).is_empty());
    }

    #[test]
    fn test_received_frame_checks_to_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let data = generate_sof_to_data(&mut rng, 3);
        let poly = Polynomial::can15();
        let layout = FrameLayout::can();

        let frame = append_crc_trailer(&data, &poly, &layout).unwrap();
        assert_eq!(frame.len(), data.len() + 16);
        let crc = crc_sim_core::compute_crc(&frame, &poly).unwrap();
        assert_eq!(crc.count_ones(), 0);
    }

    #[test]
    fn test_received_frame_checks_to_zero_narrow_polynomial() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let data = generate_sof_to_data(&mut rng, 3);
        let poly = Polynomial::parse("10011").unwrap();
        let layout = FrameLayout::can();

        let frame = append_crc_trailer(&data, &poly, &layout).unwrap();
        assert_eq!(frame.len(), data.len() + 16);
        assert_eq!(crc_sim_core::compute_crc(&frame, &poly).unwrap(), BitSeq::zeros(4));

        // Field holds the 4-bit check value behind 11 leading zeros
        let field = frame.slice(frame.len() - 15..frame.len());
        assert_eq!(field.slice(0..11), BitSeq::zeros(11));
    }

    #[test]
    fn test_trailer_rejects_wide_crc() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let data = generate_sof_to_data(&mut rng, 1);
        let wide = Polynomial::parse(&format!("1{}1", "0".repeat(16))).unwrap();
        assert!(append_crc_trailer(&data, &wide, &FrameLayout::can()).is_err());
    }
}
