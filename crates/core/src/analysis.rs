//! Single-bit error injection and Hamming-distance analysis.
//!
//! For a transmitted frame, each requested position is flipped in turn, the
//! CRC is recomputed over the corrupted frame, and the corrupted CRC is
//! compared bit-by-bit with the CRC of the intact frame. A distance of 0
//! means the flip left the CRC unchanged: the error would go undetected.
//!
//! Both CRCs are zero-extended to a common comparison width (15 bits, the
//! CAN CRC field, unless [`AnalysisOptions::width`] says otherwise) so that
//! the rows line up with the transmitted field.
//!
//! Positions at or beyond the end of the frame are skipped without a row.

use log::{debug, trace};

use crate::bits::BitSeq;
use crate::crc::{compute_crc_with_layout, Polynomial};
use crate::error::{Error, Result};
use crate::layout::{FrameLayout, CAN_CRC_FIELD_BITS};

/// Parameters for an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Layout applied to the frame before every CRC computation
    pub layout: FrameLayout,

    /// Minimum width CRCs are zero-extended to before comparison
    pub width: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            layout: FrameLayout::can(),
            width: CAN_CRC_FIELD_BITS,
        }
    }
}

/// The intact frame and its CRC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineRow {
    /// Frame as transmitted
    pub frame: BitSeq,

    /// CRC of the frame, zero-extended to the comparison width
    pub crc: BitSeq,

    /// Always 0: the baseline compared with itself
    pub distance: usize,
}

/// Result of flipping one bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRow {
    /// Index of the flipped bit in the original frame
    pub position: usize,

    /// Frame with the bit at `position` flipped
    pub corrupted_frame: BitSeq,

    /// CRC of the corrupted frame, zero-extended to the comparison width
    pub crc: BitSeq,

    /// Hamming distance between the baseline CRC and `crc`
    pub distance: usize,
}

impl ErrorRow {
    /// Check whether the flip changed the CRC.
    pub fn is_detected(&self) -> bool {
        self.distance > 0
    }
}

/// Outcome of an error-injection run, rows in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Polynomial the CRCs were computed with
    pub polynomial: Polynomial,

    /// Width the CRCs were compared at
    pub width: usize,

    /// Intact frame row
    pub baseline: BaselineRow,

    /// One row per in-range position
    pub rows: Vec<ErrorRow>,
}

impl AnalysisReport {
    /// Rows whose flip left the CRC unchanged.
    pub fn undetected(&self) -> impl Iterator<Item = &ErrorRow> {
        self.rows.iter().filter(|row| !row.is_detected())
    }

    /// Check whether every injected flip changed the CRC.
    pub fn all_detected(&self) -> bool {
        self.rows.iter().all(ErrorRow::is_detected)
    }
}

/// Count the positions at which two equal-length sequences differ.
///
/// # Errors
/// Returns `Error::LengthMismatch` if the lengths differ.
pub fn hamming_distance(a: &BitSeq, b: &BitSeq) -> Result<usize> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Every position of a frame, in order.
pub fn all_positions(frame: &BitSeq) -> std::ops::Range<usize> {
    0..frame.len()
}

/// Inject single-bit errors using the CAN layout and a 15-bit width.
///
/// See [`analyze_errors_with`].
pub fn analyze_errors(
    frame: &BitSeq,
    polynomial: &Polynomial,
    error_positions: &[usize],
) -> Result<AnalysisReport> {
    analyze_errors_with(frame, polynomial, error_positions, &AnalysisOptions::default())
}

/// Inject a single-bit error at each position and measure the CRC change.
///
/// Rows follow the order of `error_positions` (duplicates included);
/// positions `>= frame.len()` produce no row.
///
/// # Errors
/// Returns `Error::EmptyFrame` if `frame` has no bits.
pub fn analyze_errors_with(
    frame: &BitSeq,
    polynomial: &Polynomial,
    error_positions: &[usize],
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    let width = options.width.max(polynomial.degree());
    let baseline_crc = compute_crc_with_layout(frame, polynomial, &options.layout)?.zero_extend(width);
    let baseline_distance = hamming_distance(&baseline_crc, &baseline_crc)?;

    let mut rows = Vec::with_capacity(error_positions.len());
    for &position in error_positions {
        let Some(corrupted_frame) = frame.flipped(position) else {
            trace!("position {} beyond {}-bit frame, skipped", position, frame.len());
            continue;
        };

        let crc = compute_crc_with_layout(&corrupted_frame, polynomial, &options.layout)?
            .zero_extend(width);
        let distance = hamming_distance(&baseline_crc, &crc)?;
        trace!("position {}: crc {} distance {}", position, crc, distance);

        rows.push(ErrorRow {
            position,
            corrupted_frame,
            crc,
            distance,
        });
    }

    let report = AnalysisReport {
        polynomial: polynomial.clone(),
        width,
        baseline: BaselineRow {
            frame: frame.clone(),
            crc: baseline_crc,
            distance: baseline_distance,
        },
        rows,
    };
    debug!(
        "analyzed {} of {} position(s) on a {}-bit frame, {} undetected",
        report.rows.len(),
        error_positions.len(),
        frame.len(),
        report.undetected().count()
    );

    Ok(report)
}
