//! Console rendering of analysis reports.
//!
//! Prints the comparison table (one baseline row, one row per injected
//! error) with the flipped bit highlighted in red, followed by an optional
//! detection summary.

use colored::Colorize;
use crc_sim_core::analysis::{AnalysisReport, ErrorRow};
use crc_sim_core::{BitSeq, DetectionMetrics};

/// Render `frame` with the bit at `position` highlighted.
pub fn highlight_bit(frame: &BitSeq, position: usize, color: bool) -> String {
    let text = frame.to_string();
    if !color || position >= text.len() {
        return text;
    }
    let (head, rest) = text.split_at(position);
    let (bit, tail) = rest.split_at(1);
    format!("{}{}{}", head, bit.red().bold(), tail)
}

/// Hex form of a CRC for display (`-` if it cannot be rendered).
fn crc_hex(crc: &BitSeq) -> String {
    crc.to_hex().unwrap_or_else(|_| "-".to_string())
}

fn error_row(row: &ErrorRow, frame_col: usize, crc_col: usize, color: bool) -> String {
    // Padding is computed on the plain text; color codes have no width
    let frame = highlight_bit(&row.corrupted_frame, row.position, color);
    let pad = frame_col.saturating_sub(row.corrupted_frame.len());
    let distance = if row.is_detected() || !color {
        row.distance.to_string().normal()
    } else {
        row.distance.to_string().yellow().bold()
    };
    format!(
        "| {:>14} | {:14} | {}{} | {:crc_col$} | {:>8} | {:>16} |",
        row.position,
        "Yes",
        frame,
        " ".repeat(pad),
        row.crc.to_string(),
        crc_hex(&row.crc),
        distance,
    )
}

/// Print the comparison table for a report.
pub fn print_report(report: &AnalysisReport, color: bool) {
    let frame_col = report.baseline.frame.len().max("Transmitted Frame".len());
    let crc_col = report.width.max("Calculated CRC".len());
    let separator = format!(
        "|{}|{}|{}|{}|{}|{}|",
        "-".repeat(16),
        "-".repeat(16),
        "-".repeat(frame_col + 2),
        "-".repeat(crc_col + 2),
        "-".repeat(10),
        "-".repeat(18),
    );
    let rule = "=".repeat(separator.len());

    println!("Hamming Distance with and without Error Injection:");
    println!("{rule}");
    println!(
        "| {:14} | {:14} | {:frame_col$} | {:crc_col$} | {:>8} | {:>16} |",
        "Error Position", "Error Injected", "Transmitted Frame", "Calculated CRC", "Hex", "Hamming Distance",
    );
    println!("{separator}");
    println!(
        "| {:>14} | {:14} | {:frame_col$} | {:crc_col$} | {:>8} | {:>16} |",
        "[Original] N/A",
        "No",
        report.baseline.frame.to_string(),
        report.baseline.crc.to_string(),
        crc_hex(&report.baseline.crc),
        report.baseline.distance,
    );
    println!("{separator}");
    for row in &report.rows {
        println!("{}", error_row(row, frame_col, crc_col, color));
    }
    println!("{rule}");
}

/// Print the detection summary.
pub fn print_summary(metrics: &DetectionMetrics, color: bool) {
    println!();
    println!("=== Detection Summary ===");
    println!("Frame: {} bits, CRC degree {}", metrics.frame_bits, metrics.crc_degree);
    println!("Errors injected: {}", metrics.injected);
    println!("Detected: {} ({:.2}%)", metrics.detected, metrics.detection_rate() * 100.0);
    let undetected = format!("Undetected: {}", metrics.undetected);
    if metrics.undetected > 0 && color {
        println!("{}", undetected.yellow().bold());
    } else {
        println!("{undetected}");
    }
    match (metrics.min_distance, metrics.max_distance) {
        (Some(min), Some(max)) => println!(
            "Hamming distance: min {} / max {} / mean {:.2}",
            min,
            max,
            metrics.mean_distance()
        ),
        _ => println!("Hamming distance: n/a"),
    }
    println!();
}
