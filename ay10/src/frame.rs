//! # Frame-level conversions
use crate::{
    backend::{selected_backend, PixelBackend},
    colourspace::{Coefficients, Colourspace},
    word::WORD_BYTES,
    Error, Result,
};

/// Dimensions of a still frame.
///
/// Both RGBA and `ay10` frames use 4 bytes per pixel, so the same
/// [`byte_len()`][Self::byte_len] applies to either.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Frame {
    width: u32,
    height: u32,
    byte_len: usize,
}

impl Frame {
    /// Checks frame dimensions.
    ///
    /// `width` must be even: `ay10` pairs pixels horizontally, and a pair can't
    /// span two lines.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width % 2 != 0 {
            error!("frame width {width} is not a multiple of 2");
            return Err(Error::OddWidth(width));
        }

        let byte_len = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(|p| p.checked_mul(WORD_BYTES))
            .ok_or_else(|| {
                error!("frame of {width}x{height} pixels is too large");
                Error::FrameTooLarge { width, height }
            })?;

        Ok(Self {
            width,
            height,
            byte_len,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Size of the frame's pixel buffer, in bytes.
    pub const fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub const fn colourspace(&self) -> Colourspace {
        Colourspace::for_height(self.height)
    }

    /// Checks that a pixel buffer is the right size for this frame.
    pub fn check_len(&self, b: &[u8]) -> Result {
        if b.len() != self.byte_len {
            error!(
                "pixel buffer has incorrect length: expected {}, got {}",
                self.byte_len,
                b.len()
            );
            return Err(Error::IncorrectLength {
                expected: self.byte_len,
                actual: b.len(),
            });
        }
        Ok(())
    }
}

/// Converts an RGBA frame into `ay10`, in the colour space for its height.
///
/// `rgba` must be `width * height * 4` bytes; this is not checked. Use
/// [try_encode_rgba_to_yuv422] to check the frame first.
pub fn encode_rgba_to_yuv422(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    encode_with(selected_backend(), width, height, rgba)
}

/// Converts an `ay10` frame into RGBA, in the colour space for its height.
///
/// `packed` must be `width * height * 4` bytes; this is not checked. Use
/// [try_decode_yuv422_to_rgba] to check the frame first.
pub fn decode_yuv422_to_rgba(width: u32, height: u32, packed: &[u8]) -> Vec<u8> {
    decode_with(selected_backend(), width, height, packed)
}

/// [encode_rgba_to_yuv422] with a specific backend.
pub fn encode_with(backend: &dyn PixelBackend, width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let colourspace = Colourspace::for_height(height);
    trace!(
        "encoding {width}x{height} frame in {colourspace} with {} backend",
        backend.name()
    );
    let mut o = vec![0; rgba.len()];
    backend.encode(&colourspace.coefficients(), rgba, &mut o);
    o
}

/// [decode_yuv422_to_rgba] with a specific backend.
pub fn decode_with(backend: &dyn PixelBackend, width: u32, height: u32, packed: &[u8]) -> Vec<u8> {
    let coefficients = Coefficients::for_height(height);
    trace!(
        "decoding {width}x{height} frame with {} backend",
        backend.name()
    );
    let mut o = vec![0; packed.len()];
    backend.decode(&coefficients, packed, &mut o);
    o
}

/// Checks the frame dimensions and buffer size, then converts an RGBA frame
/// into `ay10`.
pub fn try_encode_rgba_to_yuv422(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    Frame::new(width, height)?.check_len(rgba)?;
    Ok(encode_rgba_to_yuv422(width, height, rgba))
}

/// Checks the frame dimensions and buffer size, then converts an `ay10` frame
/// into RGBA.
pub fn try_decode_yuv422_to_rgba(width: u32, height: u32, packed: &[u8]) -> Result<Vec<u8>> {
    Frame::new(width, height)?.check_len(packed)?;
    Ok(decode_yuv422_to_rgba(width, height, packed))
}
