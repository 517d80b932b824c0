//! Solid colour frames.
use crate::{codec::Frame, Result};
use palette::Srgba;

/// Builds an RGBA frame filled with a single colour.
///
/// ## Examples
///
/// ```
/// # fn main() -> atem_still::Result<()> {
/// use palette::Srgba;
///
/// let rgba = atem_still::solid_rgba(2, 1, Srgba::new(0xff, 0x80, 0, 0xff))?;
/// assert_eq!(vec![0xff, 0x80, 0, 0xff, 0xff, 0x80, 0, 0xff], rgba);
/// # Ok(())
/// # }
/// ```
pub fn solid_rgba(width: u32, height: u32, colour: Srgba<u8>) -> Result<Vec<u8>> {
    let frame = Frame::new(width, height)?;
    let px = [colour.red, colour.green, colour.blue, colour.alpha];
    Ok(px.repeat(frame.byte_len() / px.len()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{encode_image_for_atem, EncodingOptions, InputFormat};

    #[test]
    fn solid_black() -> Result {
        let rgba = solid_rgba(1920, 1080, Srgba::new(0, 0, 0, 0xff))?;
        assert_eq!(1920 * 1080 * 4, rgba.len());

        let info = encode_image_for_atem(
            1920,
            1080,
            &rgba,
            InputFormat::Rgba,
            &EncodingOptions::default(),
        )?;
        assert_eq!(
            Some("529971759fd78a24bd0e248269e9e5e5"),
            info.hash.as_deref()
        );
        Ok(())
    }

    #[test]
    fn grey_has_no_chroma() -> Result {
        let rgba = solid_rgba(4, 2, Srgba::new(0x80, 0x80, 0x80, 0x80))?;
        let info = encode_image_for_atem(4, 2, &rgba, InputFormat::Rgba, &Default::default())?;
        for w in info.encoded_data.chunks_exact(4) {
            let w = crate::codec::PackedWord::read_be(w);
            assert_eq!(512, w.chroma());
        }
        Ok(())
    }

    #[test]
    fn odd_width() {
        assert!(solid_rgba(5, 5, Srgba::new(0, 0, 0, 0)).is_err());
    }
}
