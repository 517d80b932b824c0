use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(test)]
    #[error(transparent)]
    FromHexError(#[from] hex::FromHexError),

    #[error(transparent)]
    Codec(#[from] crate::codec::Error),

    #[error("Pixel buffer has incorrect length. Received {actual} expected {expected}")]
    IncorrectLength { expected: usize, actual: usize },

    #[error("Unsupported input format \"{0}\"")]
    UnsupportedFormat(String),
}
