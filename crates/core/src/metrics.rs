//! Detection metrics summarizing an analysis run.
//!
//! This module condenses an [`AnalysisReport`] into the numbers that tell
//! how strong the CRC was for the injected errors:
//! - Counts of detected and undetected flips
//! - Minimum, maximum and mean Hamming distance
//! - Detection rate
//!
//! # Design
//!
//! Metrics are derived once from a finished report; they hold no reference
//! to it and never change afterwards.

use crate::analysis::AnalysisReport;

/// Summary of how the CRC reacted to the injected errors.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionMetrics {
    // === Input ===
    /// Frame length in bits
    pub frame_bits: usize,

    /// Polynomial degree (CRC width)
    pub crc_degree: usize,

    // === Injection ===
    /// Flips actually injected (in-range positions)
    pub injected: u64,

    /// Flips that changed the CRC
    pub detected: u64,

    /// Flips that left the CRC unchanged
    pub undetected: u64,

    // === Distances ===
    /// Smallest distance seen (None if nothing injected)
    pub min_distance: Option<usize>,

    /// Largest distance seen (None if nothing injected)
    pub max_distance: Option<usize>,

    /// Sum of all distances
    pub total_distance: u64,
}

impl DetectionMetrics {
    /// Collect metrics from a report.
    pub fn from_report(report: &AnalysisReport) -> Self {
        let mut metrics = Self {
            frame_bits: report.baseline.frame.len(),
            crc_degree: report.polynomial.degree(),
            injected: 0,
            detected: 0,
            undetected: 0,
            min_distance: None,
            max_distance: None,
            total_distance: 0,
        };

        for row in &report.rows {
            metrics.injected += 1;
            if row.is_detected() {
                metrics.detected += 1;
            } else {
                metrics.undetected += 1;
            }
            metrics.total_distance += row.distance as u64;
            metrics.min_distance = Some(metrics.min_distance.map_or(row.distance, |d| d.min(row.distance)));
            metrics.max_distance = Some(metrics.max_distance.map_or(row.distance, |d| d.max(row.distance)));
        }

        metrics
    }

    /// Fraction of injected flips that changed the CRC.
    ///
    /// Returns 0.0 if nothing was injected.
    pub fn detection_rate(&self) -> f64 {
        if self.injected == 0 {
            0.0
        } else {
            self.detected as f64 / self.injected as f64
        }
    }

    /// Mean Hamming distance over injected flips.
    pub fn mean_distance(&self) -> f64 {
        if self.injected == 0 {
            0.0
        } else {
            self.total_distance as f64 / self.injected as f64
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "frame_bits={}\n\
             crc_degree={}\n\
             injected={}\n\
             detected={}\n\
             undetected={}\n\
             detection_rate={:.4}\n\
             min_distance={}\n\
             max_distance={}\n\
             mean_distance={:.4}\n",
            self.frame_bits,
            self.crc_degree,
            self.injected,
            self.detected,
            self.undetected,
            self.detection_rate(),
            self.min_distance.map_or_else(|| "-".to_string(), |d| d.to_string()),
            self.max_distance.map_or_else(|| "-".to_string(), |d| d.to_string()),
            self.mean_distance(),
        )
    }
}
