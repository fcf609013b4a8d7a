//! Frame layout policy: which bits of a received frame feed the CRC.
//!
//! A received CAN-style frame ends in a fixed-width trailer that carries
//! the transmitted CRC field. Before the CRC is recomputed over a received
//! frame, the trailer is rearranged so that the data segment is followed
//! directly by the CRC field:
//!
//! ```text
//!  frame:   | SOF ~ Data (len - 16) | x | CRC field (15) |
//!  working: | SOF ~ Data (len - 16) |     CRC field (15) |
//! ```
//!
//! The single bit `x` between the data segment and the last 15 bits is
//! dropped. Frames no longer than the threshold (32 bits by default) are
//! treated as bare test data and used unchanged.
//!
//! The rule belongs to one frame format, so it is carried as an explicit
//! [`FrameLayout`] value; [`FrameLayout::raw`] turns it off entirely.

use log::debug;

use crate::bits::BitSeq;
use crate::error::{Error, Result};

/// Default threshold: frames longer than this many bits are sliced
pub const CAN_THRESHOLD_BITS: usize = 32;

/// Default trailer width: 15-bit CRC field + 1 delimiter bit
pub const CAN_TRAILER_BITS: usize = 16;

/// Default CRC field width in a CAN frame
pub const CAN_CRC_FIELD_BITS: usize = 15;

/// Describes how a frame's trailer is rearranged before CRC recomputation.
///
/// # Invariants
/// - `crc_field_bits <= trailer_bits <= threshold_bits`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Whether trailer rearrangement happens at all
    strip_trailer: bool,

    /// Frames strictly longer than this are rearranged
    threshold_bits: usize,

    /// Width of the trailing field (CRC field + delimiter)
    trailer_bits: usize,

    /// Width of the CRC field kept from the end of the trailer
    crc_field_bits: usize,
}

impl FrameLayout {
    /// Create a layout that rearranges trailers of frames above `threshold_bits`.
    ///
    /// # Errors
    /// Returns `Error::InvalidLayout` unless
    /// `crc_field_bits <= trailer_bits <= threshold_bits`.
    pub fn new(threshold_bits: usize, trailer_bits: usize, crc_field_bits: usize) -> Result<Self> {
        if crc_field_bits > trailer_bits {
            return Err(Error::InvalidLayout(format!(
                "CRC field ({crc_field_bits} bits) wider than trailer ({trailer_bits} bits)"
            )));
        }
        if trailer_bits > threshold_bits {
            return Err(Error::InvalidLayout(format!(
                "trailer ({trailer_bits} bits) wider than threshold ({threshold_bits} bits)"
            )));
        }

        Ok(Self {
            strip_trailer: true,
            threshold_bits,
            trailer_bits,
            crc_field_bits,
        })
    }

    /// CAN layout: frames over 32 bits carry a 16-bit trailer ending in a
    /// 15-bit CRC field.
    pub const fn can() -> Self {
        Self {
            strip_trailer: true,
            threshold_bits: CAN_THRESHOLD_BITS,
            trailer_bits: CAN_TRAILER_BITS,
            crc_field_bits: CAN_CRC_FIELD_BITS,
        }
    }

    /// Layout that never rearranges: every frame is divided as-is.
    pub const fn raw() -> Self {
        Self {
            strip_trailer: false,
            ..Self::can()
        }
    }

    /// Whether trailer rearrangement is enabled.
    pub fn strips_trailer(&self) -> bool {
        self.strip_trailer
    }

    /// Frames strictly longer than this are rearranged.
    pub fn threshold_bits(&self) -> usize {
        self.threshold_bits
    }

    /// Width of the trailing field.
    pub fn trailer_bits(&self) -> usize {
        self.trailer_bits
    }

    /// Width of the CRC field kept from the trailer.
    pub fn crc_field_bits(&self) -> usize {
        self.crc_field_bits
    }

    /// Check whether a frame of `frame_len` bits gets rearranged.
    pub fn applies_to(&self, frame_len: usize) -> bool {
        self.strip_trailer && frame_len > self.threshold_bits
    }

    /// Build the bit sequence the CRC is computed over.
    ///
    /// For frames this layout applies to, returns the data segment followed
    /// by the last `crc_field_bits` bits; otherwise returns a copy of
    /// `frame`.
    pub fn working_input(&self, frame: &BitSeq) -> BitSeq {
        let len = frame.len();
        if !self.applies_to(len) {
            return frame.clone();
        }

        // len > threshold >= trailer >= crc_field, so both ranges are in bounds
        let head = frame.slice(0..len - self.trailer_bits);
        let crc_field = frame.slice(len - self.crc_field_bits..len);
        debug!(
            "frame of {} bits: dropping {} trailer bit(s) before the {}-bit CRC field",
            len,
            self.trailer_bits - self.crc_field_bits,
            self.crc_field_bits
        );

        head.concat(&crc_field)
    }

    /// Lay out a frame as transmitted: `data`, the filler trailer bits
    /// (recessive, so `1`), then `crc_field`.
    ///
    /// For an enabled layout and a result longer than the threshold,
    /// [`working_input`](Self::working_input) of the assembled frame is
    /// `data ++ crc_field`.
    ///
    /// # Errors
    /// Returns `Error::LengthMismatch` if `crc_field` is not exactly
    /// `crc_field_bits` long.
    pub fn assemble(&self, data: &BitSeq, crc_field: &BitSeq) -> Result<BitSeq> {
        if crc_field.len() != self.crc_field_bits {
            return Err(Error::LengthMismatch {
                left: crc_field.len(),
                right: self.crc_field_bits,
            });
        }

        let filler: BitSeq = std::iter::repeat(true)
            .take(self.trailer_bits - self.crc_field_bits)
            .collect();
        Ok(data.concat(&filler).concat(crc_field))
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::can()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_frame_unchanged() {
        let layout = FrameLayout::can();
        let frame = BitSeq::parse(&"10".repeat(16)).unwrap();
        assert_eq!(frame.len(), 32);
        assert!(!layout.applies_to(32));
        assert_eq!(layout.working_input(&frame), frame);
    }

    #[test]
    fn test_33_bit_frame_drops_bit_17() {
        let layout = FrameLayout::can();
        // 17 data ones, a zero at index 17, then 15 ones
        let text = format!("{}0{}", "1".repeat(17), "1".repeat(15));
        let frame = BitSeq::parse(&text).unwrap();
        assert_eq!(frame.len(), 33);

        let working = layout.working_input(&frame);
        assert_eq!(working.len(), 32);
        assert_eq!(working, BitSeq::parse(&"1".repeat(32)).unwrap());
        assert_eq!(working, frame.slice(0..17).concat(&frame.slice(18..33)));
    }

    #[test]
    fn test_raw_layout_never_slices() {
        let layout = FrameLayout::raw();
        let frame = BitSeq::zeros(80);
        assert!(!layout.applies_to(80));
        assert_eq!(layout.working_input(&frame).len(), 80);
    }

    #[test]
    fn test_custom_layout() {
        // 8-bit trailer, last 6 bits are the CRC field
        let layout = FrameLayout::new(10, 8, 6).unwrap();
        let frame = BitSeq::parse("111").unwrap();
        assert_eq!(layout.working_input(&frame), frame);

        // data | dropped | CRC field
        let frame = BitSeq::parse("110011").unwrap();
        let frame = frame
            .concat(&BitSeq::parse("01").unwrap())
            .concat(&BitSeq::parse("101010").unwrap());
        assert_eq!(frame.len(), 14);
        assert_eq!(
            layout.working_input(&frame),
            BitSeq::parse("110011101010").unwrap()
        );
    }

    #[test]
    fn test_assemble_inverts_working_input() {
        let layout = FrameLayout::can();
        let data = BitSeq::parse(&"0110".repeat(7)).unwrap();
        let crc_field = BitSeq::parse("101000111000101").unwrap();

        let frame = layout.assemble(&data, &crc_field).unwrap();
        assert_eq!(frame.len(), 28 + 16);
        assert_eq!(frame.get(28), Some(true));
        assert_eq!(layout.working_input(&frame), data.concat(&crc_field));
    }

    #[test]
    fn test_assemble_rejects_wrong_crc_width() {
        let layout = FrameLayout::can();
        let data = BitSeq::zeros(20);
        assert_eq!(
            layout.assemble(&data, &BitSeq::zeros(4)),
            Err(Error::LengthMismatch { left: 4, right: 15 })
        );
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(matches!(
            FrameLayout::new(32, 16, 17),
            Err(Error::InvalidLayout(_))
        ));
        assert!(matches!(
            FrameLayout::new(8, 16, 15),
            Err(Error::InvalidLayout(_))
        ));
        assert_eq!(FrameLayout::new(32, 16, 15).unwrap(), FrameLayout::can());
    }
}
