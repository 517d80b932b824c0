#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

mod error;
mod hash;
#[cfg(feature = "palette")]
mod solid;
mod upload;

#[cfg(feature = "palette")]
pub use crate::solid::solid_rgba;
pub use {
    crate::{
        error::Error,
        hash::{frame_md5, generate_hash_for_buffer},
        upload::{
            decode_image_from_atem, encode_image_for_atem, encode_image_for_atem_str,
            EncodingOptions, InputFormat, UploadBufferInfo,
        },
    },
    ay10 as codec,
};
pub type Result<T = ()> = std::result::Result<T, Error>;
