#![doc = include_str!("../README.md")]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate tracing;

pub mod backend;
pub mod colourspace;
mod error;
mod frame;
pub mod word;

pub use crate::{
    backend::{backend_error, selected_backend, PixelBackend},
    colourspace::{Coefficients, Colourspace},
    error::{BackendError, Error},
    frame::{
        decode_with, decode_yuv422_to_rgba, encode_rgba_to_yuv422, encode_with,
        try_decode_yuv422_to_rgba, try_encode_rgba_to_yuv422, Frame,
    },
    word::PackedWord,
};

/// Result type.
pub type Result<T = ()> = std::result::Result<T, Error>;
