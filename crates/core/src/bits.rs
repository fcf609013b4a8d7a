//! Explicit bit sequences.
//!
//! A [`BitSeq`] is an ordered run of bits kept one bit per element rather
//! than packed into bytes, so lengths that are not a multiple of eight and
//! positional slicing stay exact. The textual form is a string of ASCII
//! `'0'` and `'1'` characters, most significant (first transmitted) bit
//! first. No whitespace or other separators are accepted.
//!
//! # Example
//! ```
//! use crc_sim_core::bits::BitSeq;
//!
//! let bits: BitSeq = "1101".parse().unwrap();
//! assert_eq!(bits.len(), 4);
//! assert_eq!(bits.flipped(0).unwrap().to_string(), "0101");
//! assert_eq!(bits.zero_extend(6).to_string(), "001101");
//! assert_eq!(bits.to_hex().unwrap(), "0xd");
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{BitStringError, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// An immutable sequence of bits, first bit first.
///
/// # Invariants
/// - Every operation returns a new sequence; no method mutates `self`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSeq {
    bits: Vec<bool>,
}

impl BitSeq {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create a sequence of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Parse a string of `'0'`/`'1'` characters.
    ///
    /// The empty string parses to the empty sequence; callers that need a
    /// value reject it themselves.
    ///
    /// # Errors
    /// Returns `BitStringError::InvalidChar` for the first character that is
    /// not `'0'` or `'1'`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(text.len());
        for (position, ch) in text.chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                found => return Err(BitStringError::InvalidChar { position, found }.into()),
            }
        }
        Ok(Self { bits })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Borrow the bits as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Copy out the bits in `range`.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds, like slice indexing.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            bits: self.bits[range].to_vec(),
        }
    }

    /// Return `self` followed by `other`.
    pub fn concat(&self, other: &BitSeq) -> Self {
        let mut bits = Vec::with_capacity(self.len() + other.len());
        bits.extend_from_slice(&self.bits);
        bits.extend_from_slice(&other.bits);
        Self { bits }
    }

    /// Return a copy with the bit at `position` inverted.
    ///
    /// Returns `None` if `position` is past the end.
    pub fn flipped(&self, position: usize) -> Option<Self> {
        if position >= self.len() {
            return None;
        }
        let mut bits = self.bits.clone();
        bits[position] = !bits[position];
        Some(Self { bits })
    }

    /// Left-pad with zeros up to `width` bits.
    ///
    /// Sequences already at least `width` long are returned unchanged, so
    /// the result length is `max(len, width)`.
    pub fn zero_extend(&self, width: usize) -> Self {
        let pad = width.saturating_sub(self.len());
        let mut bits = Vec::with_capacity(self.len() + pad);
        bits.resize(pad, false);
        bits.extend_from_slice(&self.bits);
        Self { bits }
    }

    /// The bits from the first set bit onward (empty if all zero).
    pub fn trim_leading_zeros(&self) -> &[bool] {
        let first = self
            .bits
            .iter()
            .position(|&bit| bit)
            .unwrap_or(self.bits.len());
        &self.bits[first..]
    }

    /// Render as a `0x`-prefixed lowercase hex literal of the unsigned value.
    ///
    /// There is no fixed width: leading zero digits are dropped and zero
    /// renders as `0x0`.
    ///
    /// # Errors
    /// Returns `BitStringError::Empty` for an empty sequence.
    pub fn to_hex(&self) -> Result<String> {
        if self.is_empty() {
            return Err(BitStringError::Empty.into());
        }

        let significant = self.trim_leading_zeros();
        if significant.is_empty() {
            return Ok("0x0".to_string());
        }

        // Align to whole nibbles by virtually padding on the left
        let lead = (4 - significant.len() % 4) % 4;
        let mut hex = String::with_capacity(2 + (significant.len() + lead) / 4);
        hex.push_str("0x");

        let mut nibble = 0usize;
        for (i, &bit) in significant.iter().enumerate() {
            nibble = (nibble << 1) | bit as usize;
            if (i + lead + 1) % 4 == 0 {
                hex.push(HEX_DIGITS[nibble] as char);
                nibble = 0;
            }
        }

        Ok(hex)
    }
}

impl FromStr for BitSeq {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.iter().map(|bit| if bit { '1' } else { '0' }).collect();
        f.pad(&text)
    }
}

impl From<Vec<bool>> for BitSeq {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<&[bool]> for BitSeq {
    fn from(bits: &[bool]) -> Self {
        Self {
            bits: bits.to_vec(),
        }
    }
}

impl FromIterator<bool> for BitSeq {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Render a bit string as a `0x`-prefixed lowercase hex literal.
///
/// # Errors
/// - `BitStringError::InvalidChar` if `bits` contains anything but `0`/`1`
/// - `BitStringError::Empty` if `bits` is empty
pub fn binary_to_hex(bits: &str) -> Result<String> {
    BitSeq::parse(bits)?.to_hex()
}
