//! # Conversion backends
//!
//! The same conversion is implemented by more than one [PixelBackend]. All
//! backends produce byte-identical output for identical input, so which one
//! is used only affects performance.
//!
//! The backend is selected once per process, on first use, and never
//! changes afterwards:
//!
//! 1. If the [`AY10_BACKEND`][BACKEND_ENV] environment variable is set to
//!    `reference`, the [Reference] backend is used.
//! 2. Otherwise, if the `wide` feature is enabled and the [Wide] backend
//!    passes a self-test against the [Reference] backend, it is used.
//! 3. Otherwise, the [Reference] backend is used, and the reason is available
//!    from [`backend_error()`].
use crate::{colourspace::Coefficients, error::BackendError};

mod reference;
#[cfg(feature = "wide")]
mod wide;

pub use self::reference::Reference;
#[cfg(feature = "wide")]
pub use self::wide::Wide;

/// Environment variable used to request a backend (`reference` or `wide`).
pub const BACKEND_ENV: &str = "AY10_BACKEND";

/// Number of pixel pairs in the self-test frame.
///
/// Not a multiple of the [Wide] backend's lane count, so its remainder
/// handling is checked too.
#[cfg(any(feature = "wide", test))]
const SELF_TEST_PAIRS: usize = 23;

/// Converts whole frames between RGBA and `ay10`.
///
/// `input` and `output` must be the same length. Callers are responsible for
/// checking buffer sizes; backends do not validate them.
pub trait PixelBackend: Send + Sync {
    /// Short name of the backend, for logging.
    fn name(&self) -> &'static str;

    /// Converts RGBA pixels in `input` into `ay10` words in `output`.
    fn encode(&self, coefficients: &Coefficients, input: &[u8], output: &mut [u8]);

    /// Converts `ay10` words in `input` into RGBA pixels in `output`.
    fn decode(&self, coefficients: &Coefficients, input: &[u8], output: &mut [u8]);
}

static REFERENCE: Reference = Reference;
#[cfg(feature = "wide")]
static WIDE: Wide = Wide;

struct Selection {
    backend: &'static dyn PixelBackend,
    error: Option<BackendError>,
}

impl Selection {
    fn new(requested: Option<&str>) -> Self {
        let error = match requested {
            Some("reference") => {
                debug!("{BACKEND_ENV} requested the reference pixel backend");
                return Self {
                    backend: &REFERENCE,
                    error: None,
                };
            }
            None | Some("wide") => match probe_wide() {
                Ok(backend) => {
                    debug!("using {} pixel backend", backend.name());
                    return Self {
                        backend,
                        error: None,
                    };
                }
                Err(e) => e,
            },
            Some(other) => BackendError::UnknownBackend(other.to_string()),
        };

        warn!("falling back to reference pixel backend: {error}");
        Self {
            backend: &REFERENCE,
            error: Some(error),
        }
    }
}

#[cfg(feature = "wide")]
fn probe_wide() -> Result<&'static dyn PixelBackend, BackendError> {
    if self_test(&WIDE) {
        Ok(&WIDE)
    } else {
        Err(BackendError::SelfTestFailed)
    }
}

#[cfg(not(feature = "wide"))]
fn probe_wide() -> Result<&'static dyn PixelBackend, BackendError> {
    Err(BackendError::Disabled)
}

/// Checks that `backend` produces the same output as [Reference] on a small
/// frame, in both colour spaces and in both directions.
#[cfg(any(feature = "wide", test))]
fn self_test(backend: &dyn PixelBackend) -> bool {
    let len = SELF_TEST_PAIRS * crate::word::PAIR_BYTES;
    let rgba: Vec<u8> = (0..len).map(|i| (i * 151 + 17) as u8).collect();

    for height in [576, 1080] {
        let c = Coefficients::for_height(height);

        let mut expected = vec![0; len];
        let mut actual = vec![0; len];
        REFERENCE.encode(&c, &rgba, &mut expected);
        backend.encode(&c, &rgba, &mut actual);
        if expected != actual {
            error!("{} backend encoder self-test failed", backend.name());
            return false;
        }

        let packed = expected;
        let mut expected = vec![0; len];
        REFERENCE.decode(&c, &packed, &mut expected);
        backend.decode(&c, &packed, &mut actual);
        if expected != actual {
            error!("{} backend decoder self-test failed", backend.name());
            return false;
        }
    }

    true
}

lazy_static! {
    static ref SELECTION: Selection = Selection::new(std::env::var(BACKEND_ENV).ok().as_deref());
}

/// Gets the [PixelBackend] selected for this process.
pub fn selected_backend() -> &'static dyn PixelBackend {
    SELECTION.backend
}

/// Gets the reason the preferred backend could not be used, if any.
pub fn backend_error() -> Option<&'static BackendError> {
    SELECTION.error.as_ref()
}
