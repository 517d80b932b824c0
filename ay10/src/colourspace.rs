//! # Colour space coefficients
//!
//! The switcher doesn't record which colour space a frame uses. Stills are
//! always in the colour space of the current video mode: BT.709 for HD and
//! larger modes, BT.601 for SD modes.
//!
//! ## Code ranges
//!
//! All components use "legal" (studio) range 10-bit codes:
//!
//! * luma: black at `64`, white at `937`
//! * chroma: centred on `512`
//! * alpha: transparent at `64`, opaque at `940`
#[cfg(feature = "clap")]
use clap::ValueEnum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Minimum frame height which uses [Colourspace::Bt709].
pub const HD_MIN_LINES: u32 = 720;

/// Luma code for black.
pub const LUMA_OFFSET: f64 = 64.;
/// Scale from 8-bit luma to 10-bit legal range.
pub const LUMA_SCALE: f64 = 219. / 64.;
/// Chroma code for zero colour difference.
pub const CHROMA_OFFSET: f64 = 512.;
/// Scale from 8-bit colour difference to 10-bit legal range.
pub const CHROMA_SCALE: f64 = 224. / 64. / 2.;
/// Alpha code for a fully-transparent pixel.
pub const ALPHA_OFFSET: f64 = 64.;
/// Scale from 8-bit full range alpha to 10-bit legal range.
pub const ALPHA_SCALE: f64 = 219. / 255. * 4.;

/// Largest value a 10-bit code can hold.
pub const MAX_CODE: u16 = 0x3ff;

/// Colour space of a frame.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Colourspace {
    /// ITU-R BT.601, used for standard definition frames.
    Bt601,
    /// ITU-R BT.709, used for high definition (and larger) frames.
    #[default]
    Bt709,
}

impl Colourspace {
    /// Selects the colour space for a frame with `height` lines.
    pub const fn for_height(height: u32) -> Self {
        if height >= HD_MIN_LINES {
            Self::Bt709
        } else {
            Self::Bt601
        }
    }

    /// Red and blue luma weights: `(KR, KB)`.
    pub const fn kr_kb(&self) -> (f64, f64) {
        match self {
            Self::Bt601 => (0.299, 0.114),
            Self::Bt709 => (0.2126, 0.0722),
        }
    }

    /// Derives the conversion coefficients for this colour space.
    pub fn coefficients(&self) -> Coefficients {
        let (kr, kb) = self.kr_kb();
        Coefficients::new(kr, kb)
    }
}

impl Display for Colourspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bt601 => f.write_str("BT.601"),
            Self::Bt709 => f.write_str("BT.709"),
        }
    }
}

/// Luma/chroma matrix coefficients, derived from a pair of `KR` and `KB`
/// weights.
///
/// Colour differences are kept in the 8-bit domain (`-255.0 ..= 255.0`); the
/// remap to 10-bit codes happens in [`luma_code()`] and [`chroma_code()`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Coefficients {
    pub kr: f64,
    pub kg: f64,
    pub kb: f64,

    /// `1 - KR`
    pub kr_i: f64,
    /// `1 - KB`
    pub kb_i: f64,

    /// `KR / (1 - KB)`
    pub kr_o_kb_i: f64,
    /// `KG / (1 - KB)`
    pub kg_o_kb_i: f64,
    /// `KB / (1 - KR)`
    pub kb_o_kr_i: f64,
    /// `KG / (1 - KR)`
    pub kg_o_kr_i: f64,

    /// Weight of `Cr` when recovering green.
    pub cr_to_g: f64,
    /// Weight of `Cb` when recovering green.
    pub cb_to_g: f64,
}

impl Coefficients {
    pub fn new(kr: f64, kb: f64) -> Self {
        let kg = 1. - kr - kb;
        let kr_i = 1. - kr;
        let kb_i = 1. - kb;

        Self {
            kr,
            kg,
            kb,
            kr_i,
            kb_i,
            kr_o_kb_i: kr / kb_i,
            kg_o_kb_i: kg / kb_i,
            kb_o_kr_i: kb / kr_i,
            kg_o_kr_i: kg / kr_i,
            cr_to_g: kr * kr_i / kg,
            cb_to_g: kb * kb_i / kg,
        }
    }

    /// Coefficients for a frame with `height` lines.
    #[inline]
    pub fn for_height(height: u32) -> Self {
        Colourspace::for_height(height).coefficients()
    }

    #[inline(always)]
    pub fn luma(&self, r: f64, g: f64, b: f64) -> f64 {
        self.kr * r + self.kg * g + self.kb * b
    }

    /// Blue colour difference.
    #[inline(always)]
    pub fn cb(&self, r: f64, g: f64, b: f64) -> f64 {
        -self.kr_o_kb_i * r - self.kg_o_kb_i * g + b
    }

    /// Red colour difference.
    #[inline(always)]
    pub fn cr(&self, r: f64, g: f64, b: f64) -> f64 {
        r - self.kg_o_kr_i * g - self.kb_o_kr_i * b
    }

    #[inline(always)]
    pub fn red(&self, y: f64, cr: f64) -> f64 {
        y + self.kr_i * cr
    }

    #[inline(always)]
    pub fn green(&self, y: f64, cb: f64, cr: f64) -> f64 {
        y - self.cr_to_g * cr - self.cb_to_g * cb
    }

    #[inline(always)]
    pub fn blue(&self, y: f64, cb: f64) -> f64 {
        y + self.kb_i * cb
    }
}

/// Rounds and clamps a value to a 10-bit code.
///
/// Rounding is half away from zero. No code derived from 8-bit input falls
/// outside `0..=1023`, the clamp keeps fields from overlapping if one did.
#[inline(always)]
fn to_code(v: f64) -> u16 {
    v.round().clamp(0., MAX_CODE as f64) as u16
}

/// Converts an 8-bit domain luma value into a legal range 10-bit code.
#[inline(always)]
pub fn luma_code(y: f64) -> u16 {
    to_code(LUMA_OFFSET + y * LUMA_SCALE)
}

/// Converts an 8-bit domain colour difference into a legal range 10-bit code.
#[inline(always)]
pub fn chroma_code(c: f64) -> u16 {
    to_code(CHROMA_OFFSET + c * CHROMA_SCALE)
}

/// Converts a full range 8-bit alpha value into a legal range 10-bit code.
#[inline(always)]
pub fn alpha_code(a: f64) -> u16 {
    to_code((ALPHA_SCALE * a).round() + ALPHA_OFFSET)
}

#[inline(always)]
pub fn luma_from_code(code: u16) -> f64 {
    (f64::from(code) - LUMA_OFFSET) / LUMA_SCALE
}

#[inline(always)]
pub fn chroma_from_code(code: u16) -> f64 {
    (f64::from(code) - CHROMA_OFFSET) / CHROMA_SCALE
}

#[inline(always)]
pub fn alpha_from_code(code: u16) -> f64 {
    (f64::from(code) - ALPHA_OFFSET) / ALPHA_SCALE
}

/// Rounds and clamps an 8-bit domain value back to a `u8`.
#[inline(always)]
pub fn to_u8(v: f64) -> u8 {
    v.round().clamp(0., 255.) as u8
}
