//! Integration tests for the full analysis pipeline.
//!
//! These tests drive the public API end to end: parse bit strings ->
//! compute CRC -> inject errors -> compare distances -> summarize, using
//! CAN-sized frames as well as short test frames.

use crc_sim_core::{
    analysis::all_positions,
    analyze_errors, analyze_errors_with, binary_to_hex, compute_crc, compute_crc_with_layout,
    crc::crc_remainder,
    hamming_distance, AnalysisOptions, BitSeq, DetectionMetrics, Error, FrameLayout, Polynomial,
};

/// Build a received CAN-style frame: data, one trailer bit, then the CRC of
/// the data in the final 15 bits.
fn can_frame(data: &BitSeq, trailer_bit: &str) -> BitSeq {
    let crc = crc_remainder(data, &Polynomial::can15());
    data.concat(&BitSeq::parse(trailer_bit).unwrap()).concat(&crc)
}

/// The assembled frame matches the hand-built one with a recessive filler.
#[test]
fn test_assemble_matches_received_layout() {
    let data = sof_to_data();
    let crc = crc_remainder(&data, &Polynomial::can15());
    let assembled = FrameLayout::can().assemble(&data, &crc).unwrap();
    assert_eq!(assembled, can_frame(&data, "1"));
}

/// SOF, 11-bit identifier 0x123, RTR/IDE/r0, DLC 1, data byte 0xA5.
fn sof_to_data() -> BitSeq {
    BitSeq::parse("000100100011000000110100101").unwrap()
}

/// Test the textbook example through every public entry point.
#[test]
fn test_textbook_example() {
    let frame: BitSeq = "1101011011".parse().unwrap();
    let poly: Polynomial = "10011".parse().unwrap();

    let crc = compute_crc(&frame, &poly).expect("crc failed");
    assert_eq!(crc.to_string(), "1110");
    assert_eq!(binary_to_hex(&crc.to_string()).unwrap(), "0xe");

    let report = analyze_errors(&frame, &poly, &[0, 5, 9]).expect("analysis failed");
    assert_eq!(report.baseline.crc.to_string(), "000000000001110");
    assert!(report.all_detected());
}

/// A correctly received frame recomputes to an all-zero CRC.
#[test]
fn test_received_frame_checks_to_zero() {
    let data = sof_to_data();
    let frame = can_frame(&data, "1");
    assert_eq!(frame.len(), data.len() + 16);

    let crc = compute_crc(&frame, &Polynomial::can15()).unwrap();
    assert_eq!(crc, BitSeq::zeros(15));
    assert_eq!(binary_to_hex(&crc.to_string()).unwrap(), "0x0");
}

/// The single bit before the CRC field never influences the result.
#[test]
fn test_trailer_bit_ignored() {
    let data = sof_to_data();
    let poly = Polynomial::can15();

    let with_one = compute_crc(&can_frame(&data, "1"), &poly).unwrap();
    let with_zero = compute_crc(&can_frame(&data, "0"), &poly).unwrap();
    assert_eq!(with_one, with_zero);
}

/// Sweeping every position of a received frame: every flip is detected
/// except the ignored trailer bit.
#[test]
fn test_full_sweep_on_received_frame() {
    let frame = can_frame(&sof_to_data(), "1");
    let poly = Polynomial::can15();
    let positions: Vec<usize> = all_positions(&frame).collect();

    let report = analyze_errors(&frame, &poly, &positions).unwrap();
    assert_eq!(report.rows.len(), frame.len());

    let undetected: Vec<usize> = report.undetected().map(|row| row.position).collect();
    assert_eq!(undetected, vec![frame.len() - 16]);

    // Baseline is zero, so each distance is the weight of the corrupted CRC
    for row in &report.rows {
        assert_eq!(row.distance, row.crc.count_ones());
    }

    let metrics = DetectionMetrics::from_report(&report);
    assert_eq!(metrics.injected, frame.len() as u64);
    assert_eq!(metrics.undetected, 1);
    assert_eq!(metrics.min_distance, Some(0));
}

/// Flipping the last CRC-field bit shifts the CRC by x^15 mod g.
#[test]
fn test_crc_field_flip_syndrome() {
    let frame = can_frame(&sof_to_data(), "1");
    let last = frame.len() - 1;

    let report = analyze_errors(&frame, &Polynomial::can15(), &[last]).unwrap();
    assert_eq!(report.rows[0].crc.to_string(), "100010110011001");
    assert_eq!(report.rows[0].distance, 7);
}

/// The raw layout divides the whole frame, so the trailer bit matters.
#[test]
fn test_raw_layout_detects_trailer_bit() {
    let frame = can_frame(&sof_to_data(), "1");
    let options = AnalysisOptions {
        layout: FrameLayout::raw(),
        width: 15,
    };
    let trailer = frame.len() - 16;

    let report = analyze_errors_with(&frame, &Polynomial::can15(), &[trailer], &options).unwrap();
    assert!(report.all_detected());
}

/// A 33-bit frame is divided as frame[0:17] ++ frame[18:33].
#[test]
fn test_33_bit_frame_slicing() {
    let frame = BitSeq::parse("101100111000101101110010101011101").unwrap();
    assert_eq!(frame.len(), 33);
    let poly = Polynomial::parse("10011").unwrap();

    let sliced = frame.slice(0..17).concat(&frame.slice(18..33));
    let expected = compute_crc_with_layout(&sliced, &poly, &FrameLayout::raw()).unwrap();
    assert_eq!(compute_crc(&frame, &poly).unwrap(), expected);
    assert_eq!(expected.to_string(), "0010");

    let unsliced = compute_crc_with_layout(&frame, &poly, &FrameLayout::raw()).unwrap();
    assert_ne!(compute_crc(&frame, &poly).unwrap(), unsliced);
}

/// Out-of-range positions yield no rows and are not errors.
#[test]
fn test_skip_out_of_range() {
    let frame = BitSeq::parse("110100111").unwrap();
    let poly = Polynomial::parse("1011").unwrap();
    let len = frame.len();

    let report = analyze_errors(&frame, &poly, &[len, len + 5]).unwrap();
    assert!(report.rows.is_empty());
    assert_eq!(report.baseline.distance, 0);
}

/// Errors surface from each entry point.
#[test]
fn test_error_taxonomy() {
    assert!(matches!(Polynomial::parse("01"), Err(Error::InvalidPolynomial { .. })));
    assert!(matches!(binary_to_hex("10201"), Err(Error::InvalidBitString(_))));
    assert!(matches!(BitSeq::parse("1 0"), Err(Error::InvalidBitString(_))));
    assert!(matches!(
        hamming_distance(&BitSeq::parse("101").unwrap(), &BitSeq::parse("10").unwrap()),
        Err(Error::LengthMismatch { left: 3, right: 2 })
    ));
    assert!(matches!(
        compute_crc(&BitSeq::new(), &Polynomial::can15()),
        Err(Error::EmptyFrame)
    ));
}
