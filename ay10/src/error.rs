use thiserror::Error;

/// Error types.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(test)]
    #[error(transparent)]
    FromHexError(#[from] hex::FromHexError),

    #[error("pixel buffer has incorrect length: expected {expected} bytes, got {actual}")]
    IncorrectLength { expected: usize, actual: usize },

    #[error("frame width must be a multiple of 2, got {0}")]
    OddWidth(u32),

    #[error("frame of {width}x{height} pixels is too large")]
    FrameTooLarge { width: u32, height: u32 },
}

/// Reasons the wide conversion backend was not selected.
///
/// These are recorded once, when the backend is first selected, and are
/// available from [`backend_error()`][crate::backend_error]. Conversions never
/// fail because of them: the reference backend is used instead.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BackendError {
    #[error("wide backend was disabled at compile time")]
    Disabled,

    #[error("wide backend output did not match the reference backend")]
    SelfTestFailed,

    #[error("unknown conversion backend requested: {0:?}")]
    UnknownBackend(String),
}
