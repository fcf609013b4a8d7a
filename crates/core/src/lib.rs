//! crc-sim-core: bit-level CRC engine with single-bit error-injection analysis
//!
//! This library provides the core components for studying how well a CRC
//! detects transmission errors in CAN-style frames:
//! - Computes CRCs by polynomial long division over explicit bit strings
//! - Rearranges a received frame's CRC trailer before recomputation
//! - Flips single bits at chosen positions and recomputes the CRC
//! - Reports the Hamming distance between intact and corrupted CRCs
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bits`: Bit sequence value type and hex rendering
//! - `crc`: Generator polynomials and the division engine
//! - `layout`: Frame trailer policy applied before division
//! - `analysis`: Error injection and Hamming distance
//! - `metrics`: Detection summary of an analysis run
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Pure**: No I/O and no shared state; every call is independent
//! - **No presentation**: Tables and colors belong to the caller

pub mod analysis;
pub mod bits;
pub mod crc;
pub mod error;
pub mod layout;
pub mod metrics;

// Re-export commonly used types
pub use analysis::{analyze_errors, analyze_errors_with, hamming_distance, AnalysisOptions, AnalysisReport};
pub use bits::{binary_to_hex, BitSeq};
pub use crc::{compute_crc, compute_crc_with_layout, Polynomial};
pub use error::{Error, Result};
pub use layout::FrameLayout;
pub use metrics::DetectionMetrics;
