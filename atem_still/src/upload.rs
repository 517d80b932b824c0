//! # Still upload preparation
//!
//! Switchers take stills as `ay10` frames, in the colour space of the current
//! video mode. [encode_image_for_atem] converts an image into that format and
//! describes it with an [UploadBufferInfo].
use crate::{
    codec::{self, decode_yuv422_to_rgba, encode_rgba_to_yuv422, Frame},
    hash::generate_hash_for_buffer,
    Error, Result,
};
#[cfg(feature = "clap")]
use clap::ValueEnum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Pixel format of an image to upload.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputFormat {
    /// 8-bit RGBA, 4 bytes per pixel, no padding.
    #[default]
    Rgba,
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rgba" => Ok(Self::Rgba),
            _ => {
                error!("unsupported input format: {s:?}");
                Err(Error::UnsupportedFormat(s.to_string()))
            }
        }
    }
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgba => f.write_str("rgba"),
        }
    }
}

/// Options for [encode_image_for_atem].
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodingOptions {
    /// Don't run-length encode the frame.
    ///
    /// Frames are never run-length encoded, so this currently has no effect.
    pub disable_rle: bool,
}

/// An encoded frame, ready to upload.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UploadBufferInfo {
    /// Frame data to send to the switcher.
    pub encoded_data: Vec<u8>,

    /// Length of [`encoded_data`][Self::encoded_data], in bytes.
    pub raw_data_length: usize,

    /// `true` if [`encoded_data`][Self::encoded_data] is run-length encoded.
    ///
    /// This is always `false`.
    pub is_rle_encoded: bool,

    /// Hex-encoded MD5 of [`encoded_data`][Self::encoded_data], or `None` if
    /// there is no data.
    pub hash: Option<String>,
}

impl From<Vec<u8>> for UploadBufferInfo {
    fn from(encoded_data: Vec<u8>) -> Self {
        Self {
            raw_data_length: encoded_data.len(),
            is_rle_encoded: false,
            hash: generate_hash_for_buffer(&encoded_data),
            encoded_data,
        }
    }
}

/// Checks frame dimensions and that `data` is the right size for the frame.
fn check_frame(width: u32, height: u32, data: &[u8]) -> Result<Frame> {
    let frame = Frame::new(width, height)?;
    frame.check_len(data).map_err(|e| match e {
        codec::Error::IncorrectLength { expected, actual } => {
            Error::IncorrectLength { expected, actual }
        }
        e => Error::Codec(e),
    })?;
    Ok(frame)
}

fn encode_frame(frame: &Frame, data: &[u8], format: InputFormat) -> UploadBufferInfo {
    let encoded_data = match format {
        InputFormat::Rgba => encode_rgba_to_yuv422(frame.width(), frame.height(), data),
    };

    let info = UploadBufferInfo::from(encoded_data);
    debug!(
        "encoded {}x{} {format} frame in {}: {} bytes, hash {:?}",
        frame.width(),
        frame.height(),
        frame.colourspace(),
        info.raw_data_length,
        info.hash
    );
    info
}

/// Converts an image into a frame that can be uploaded to a switcher.
///
/// The frame is converted in the colour space for its `height`, which must be
/// the height of the switcher's current video mode.
///
/// Returns [Error::IncorrectLength] if `data` is not `width * height * 4`
/// bytes, before doing any conversion.
pub fn encode_image_for_atem(
    width: u32,
    height: u32,
    data: &[u8],
    format: InputFormat,
    _options: &EncodingOptions,
) -> Result<UploadBufferInfo> {
    let frame = check_frame(width, height, data)?;
    Ok(encode_frame(&frame, data, format))
}

/// [encode_image_for_atem], with the input format given as a string (eg:
/// `"rgba"`).
///
/// Returns [Error::UnsupportedFormat] for unknown formats, before doing any
/// conversion.
pub fn encode_image_for_atem_str(
    width: u32,
    height: u32,
    data: &[u8],
    format: &str,
    _options: &EncodingOptions,
) -> Result<UploadBufferInfo> {
    let frame = check_frame(width, height, data)?;
    let format = format.parse::<InputFormat>()?;
    Ok(encode_frame(&frame, data, format))
}

/// Converts an uncompressed frame from a switcher into RGBA.
pub fn decode_image_from_atem(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>> {
    let frame = check_frame(width, height, data)?;
    Ok(decode_yuv422_to_rgba(frame.width(), frame.height(), data))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rng, Rng};

    const OPTIONS: EncodingOptions = EncodingOptions { disable_rle: false };

    #[test]
    fn format_tags() -> Result {
        assert_eq!(InputFormat::Rgba, "rgba".parse::<InputFormat>()?);
        assert_eq!("rgba", InputFormat::Rgba.to_string());
        assert!(matches!(
            "RGBA".parse::<InputFormat>(),
            Err(Error::UnsupportedFormat(f)) if f == "RGBA"
        ));
        Ok(())
    }

    #[cfg(feature = "clap")]
    #[test]
    fn clap_format_tags() -> Result {
        use clap::ValueEnum;

        // Command line values are the same tags FromStr accepts.
        for v in InputFormat::value_variants() {
            let tag = v.to_possible_value().map(|p| p.get_name().to_string());
            assert_eq!(Some(v.to_string()), tag);
            assert_eq!(*v, v.to_string().parse::<InputFormat>()?);
        }

        let info = encode_image_for_atem_str(2, 2, &[0; 16], "rgba", &OPTIONS)?;
        assert_eq!(16, info.raw_data_length);
        Ok(())
    }

    #[test]
    fn two_by_two() -> Result {
        // Two black and two white pixels, SD
        let rgba = [
            0, 0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, //
            0, 0, 0, 0xff, 0xff, 0xff, 0xff, 0xff,
        ];

        let info = encode_image_for_atem(2, 2, &rgba, InputFormat::Rgba, &OPTIONS)?;
        // Chroma is sampled from the black pixel in each pair.
        let expected = hex::decode("3ac800403ac803a9".repeat(2))?;
        assert_eq!(expected, info.encoded_data);
        assert_eq!(16, info.raw_data_length);
        assert!(!info.is_rle_encoded);
        assert_eq!(
            Some(hex::encode(crate::frame_md5(&expected))),
            info.hash
        );

        assert_eq!(
            info,
            encode_image_for_atem_str(2, 2, &rgba, "rgba", &EncodingOptions { disable_rle: true })?
        );

        assert_eq!(rgba.as_slice(), decode_image_from_atem(2, 2, &info.encoded_data)?);
        Ok(())
    }

    #[test]
    fn descriptor_invariants() -> Result {
        let mut rng = rng();
        for (width, height) in [(0, 0), (2, 1), (16, 9), (64, 720)] {
            let mut rgba = vec![0; width as usize * height as usize * 4];
            rng.fill(rgba.as_mut_slice());

            let info = encode_image_for_atem(width, height, &rgba, InputFormat::Rgba, &OPTIONS)?;
            assert_eq!(info.encoded_data.len(), info.raw_data_length);
            assert_eq!(rgba.len(), info.raw_data_length);
            assert!(!info.is_rle_encoded);
            assert_eq!(rgba.is_empty(), info.hash.is_none());
        }
        Ok(())
    }

    #[test]
    fn incorrect_length() {
        let _ = tracing_subscriber::fmt().try_init();
        for len in [0, 15, 17, 32] {
            let rgba = vec![0; len];
            assert!(matches!(
                encode_image_for_atem(2, 2, &rgba, InputFormat::Rgba, &OPTIONS),
                Err(Error::IncorrectLength { expected: 16, actual }) if actual == len
            ));
            assert!(matches!(
                encode_image_for_atem_str(2, 2, &rgba, "rgba", &OPTIONS),
                Err(Error::IncorrectLength { expected: 16, actual }) if actual == len
            ));
            assert!(matches!(
                decode_image_from_atem(2, 2, &rgba),
                Err(Error::IncorrectLength { expected: 16, actual }) if actual == len
            ));
        }

        // The length is checked before the format.
        assert!(matches!(
            encode_image_for_atem_str(2, 2, &[0; 4], "bgra", &OPTIONS),
            Err(Error::IncorrectLength { .. })
        ));
    }

    #[test]
    fn unsupported_format() {
        let _ = tracing_subscriber::fmt().try_init();
        for format in ["bgra", "", "yuv422"] {
            assert!(matches!(
                encode_image_for_atem_str(2, 2, &[0; 16], format, &OPTIONS),
                Err(Error::UnsupportedFormat(f)) if f == format
            ));
        }
    }

    #[test]
    fn odd_width() {
        assert!(matches!(
            encode_image_for_atem(3, 2, &[0; 24], InputFormat::Rgba, &OPTIONS),
            Err(Error::Codec(crate::codec::Error::OddWidth(3)))
        ));
    }
}
