//! CRC computation by binary polynomial long division over GF(2).
//!
//! The engine works on explicit bit sequences, so inputs of any length
//! (not just whole bytes) are divided exactly as written on paper:
//!
//! ```text
//!   1101011011 0000   <- input padded with degree zero bits
//!   10011             <- XOR generator wherever the leading bit is 1
//!    10011
//!       ...
//!             1110    <- remainder = CRC
//! ```
//!
//! No reflection, initial value or final XOR is applied. Received frames
//! are first passed through a [`FrameLayout`] which decides which bits are
//! divided.
//!
//! # Example
//! ```
//! use crc_sim_core::bits::BitSeq;
//! use crc_sim_core::crc::{compute_crc, Polynomial};
//!
//! let frame: BitSeq = "1101011011".parse().unwrap();
//! let poly: Polynomial = "10011".parse().unwrap();
//! assert_eq!(compute_crc(&frame, &poly).unwrap().to_string(), "1110");
//! ```

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::bits::BitSeq;
use crate::error::{Error, Result};
use crate::layout::FrameLayout;

/// CAN CRC-15 generator: x^15 + x^14 + x^10 + x^8 + x^7 + x^4 + x^3 + 1
const CAN15_POLY: u16 = 0xC599;

/// A generator polynomial with leading zeros stripped.
///
/// # Invariants
/// - At least 2 bits, and the first bit is 1
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    bits: BitSeq,
}

impl Polynomial {
    /// Build a polynomial from its coefficient bits, highest power first.
    ///
    /// Leading zeros are stripped.
    ///
    /// # Errors
    /// Returns `Error::InvalidPolynomial` if fewer than 2 bits remain.
    pub fn new(bits: &BitSeq) -> Result<Self> {
        let stripped = bits.trim_leading_zeros();
        if stripped.len() < 2 {
            return Err(Error::InvalidPolynomial {
                stripped_len: stripped.len(),
            });
        }
        Ok(Self {
            bits: BitSeq::from(stripped),
        })
    }

    /// Parse a polynomial from a `'0'`/`'1'` string.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(&BitSeq::parse(text)?)
    }

    /// The CAN CRC-15 generator (`1100010110011001`).
    pub fn can15() -> Self {
        let bits = (0..16).rev().map(|i| (CAN15_POLY >> i) & 1 == 1).collect();
        Self { bits }
    }

    /// Degree of the polynomial, which is also the CRC width in bits.
    pub fn degree(&self) -> usize {
        self.bits.len() - 1
    }

    /// Number of coefficient bits (`degree + 1`).
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// The stripped coefficient bits.
    pub fn as_bits(&self) -> &BitSeq {
        &self.bits
    }
}

impl FromStr for Polynomial {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.bits, f)
    }
}

/// Divide `input` by `polynomial` and return the remainder.
///
/// The input is padded with `degree` zero bits; only the original `n`
/// positions act as pivots. The result is always `degree` bits long.
pub fn crc_remainder(input: &BitSeq, polynomial: &Polynomial) -> BitSeq {
    let n = input.len();
    let poly = polynomial.as_bits().as_slice();

    let mut buffer = Vec::with_capacity(n + poly.len() - 1);
    buffer.extend_from_slice(input.as_slice());
    buffer.resize(n + poly.len() - 1, false);

    for i in 0..n {
        if buffer[i] {
            for (slot, &coeff) in buffer[i..i + poly.len()].iter_mut().zip(poly) {
                *slot ^= coeff;
            }
        }
    }

    // buffer[n - 1] is the last pivot and is always cleared by now
    BitSeq::from(&buffer[n..])
}

/// Compute the CRC of a frame under the CAN frame layout.
///
/// Frames longer than 32 bits have their 16-bit trailer rearranged first
/// (see [`FrameLayout::can`]); shorter frames are divided as-is.
///
/// # Errors
/// Returns `Error::EmptyFrame` if `frame` has no bits.
pub fn compute_crc(frame: &BitSeq, polynomial: &Polynomial) -> Result<BitSeq> {
    compute_crc_with_layout(frame, polynomial, &FrameLayout::can())
}

/// Compute the CRC of a frame under an explicit layout.
///
/// # Errors
/// Returns `Error::EmptyFrame` if `frame` has no bits.
pub fn compute_crc_with_layout(
    frame: &BitSeq,
    polynomial: &Polynomial,
    layout: &FrameLayout,
) -> Result<BitSeq> {
    if frame.is_empty() {
        return Err(Error::EmptyFrame);
    }

    let working = layout.working_input(frame);
    let crc = crc_remainder(&working, polynomial);
    trace!("crc over {} bits (poly {}): {}", working.len(), polynomial, crc);

    Ok(crc)
}
