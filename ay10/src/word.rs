//! # Bit-packed `ay10` words
//!
//! Every pixel is stored as a big-endian `u32`:
//!
//! * `y`: 10 bits (LSB)
//! * `cb` or `cr`: 10 bits (subsampled)
//! * `a`: 10 bits
//! * 2 bits padding (MSB)
//!
//! The first pixel of each horizontal pair carries `cb`, and the second
//! carries `cr`. Both pixels share the same chroma samples.
use crate::colourspace::MAX_CODE;
use modular_bitfield::{
    bitfield,
    specifiers::{B10, B2},
};

/// Size of a [PackedWord] in bytes.
pub const WORD_BYTES: usize = 4;

/// Size of a horizontal pixel pair in bytes, in both RGBA and `ay10`.
pub const PAIR_BYTES: usize = WORD_BYTES * 2;

#[bitfield(bits = 32)]
#[repr(u32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackedWord {
    pub luma: B10,
    pub chroma: B10,
    pub alpha: B10,
    #[skip]
    __: B2,
}

impl PackedWord {
    /// Packs 10-bit codes into a word.
    ///
    /// Codes must already be in `0..=1023`.
    #[inline(always)]
    pub fn from_codes(alpha: u16, chroma: u16, luma: u16) -> Self {
        debug_assert!(alpha <= MAX_CODE && chroma <= MAX_CODE && luma <= MAX_CODE);
        Self::new()
            .with_alpha(alpha)
            .with_chroma(chroma)
            .with_luma(luma)
    }

    /// Reads a word from the first 4 bytes of `b`.
    #[inline(always)]
    pub fn read_be(b: &[u8]) -> Self {
        let mut w = [0; WORD_BYTES];
        w.copy_from_slice(&b[..WORD_BYTES]);
        Self::from(u32::from_be_bytes(w))
    }

    /// Writes this word into the first 4 bytes of `b`.
    #[inline(always)]
    pub fn write_be(self, b: &mut [u8]) {
        b[..WORD_BYTES].copy_from_slice(&u32::from(self).to_be_bytes());
    }
}
