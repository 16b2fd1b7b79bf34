//! Output sinks for decoded bits

use bitvec::prelude::*;

/// Receiver for bits produced by traceback.
///
/// Traceback walks time backward, so `bits[0]` is the newest decoded bit and
/// `bits[bits.len() - 1]` the oldest. Implementations must append them oldest
/// first. Each byte carries one bit; any non-zero value is a 1.
pub trait BitSink {
    fn write_bitlist_reversed(&mut self, bits: &[u8]);
}

/// Packs decoded bits MSB-first into bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(num_bits),
        }
    }

    /// Append the low `width` bits of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, width: usize) {
        assert!(width <= 32, "width must be <= 32");
        for shift in (0..width).rev() {
            self.bits.push((value >> shift) & 1 != 0);
        }
    }

    /// Append bits in the order given, one bit per byte
    pub fn write_bitlist(&mut self, bits: &[u8]) {
        self.bits.extend(bits.iter().map(|&bit| bit != 0));
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Written bits as bytes, zero-padded in the last byte
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.as_raw_slice().to_vec()
    }

    pub fn reset(&mut self) {
        self.bits.clear();
    }
}

impl BitSink for BitWriter {
    fn write_bitlist_reversed(&mut self, bits: &[u8]) {
        self.bits.extend(bits.iter().rev().map(|&bit| bit != 0));
    }
}

/// One decoded bit per element, 0 or 1
impl BitSink for Vec<u8> {
    fn write_bitlist_reversed(&mut self, bits: &[u8]) {
        self.extend(bits.iter().rev().map(|&bit| u8::from(bit != 0)));
    }
}
