//! Error types for buffer and strip operations

use core::convert::Infallible;
use core::fmt;

/// Error type for strip operations
///
/// `E` is the transmission channel's own error type. Operations that never
/// touch a channel use the `Infallible` default and can be rebound with
/// [`StripError::widen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripError<E = Infallible> {
    /// A parameter is malformed (zero length, zero resolution, empty slice)
    InvalidArgument,
    /// A pixel index or range falls outside the strip
    OutOfRange,
    /// The pixel buffer capacity cannot hold the requested strip
    OutOfMemory,
    /// The channel stayed busy past the wait deadline
    Timeout,
    /// Transmission channel failure
    Channel(E),
}

impl StripError {
    /// Rebind a channel-free error to a concrete channel error type
    pub fn widen<E>(self) -> StripError<E> {
        match self {
            Self::InvalidArgument => StripError::InvalidArgument,
            Self::OutOfRange => StripError::OutOfRange,
            Self::OutOfMemory => StripError::OutOfMemory,
            Self::Timeout => StripError::Timeout,
            Self::Channel(e) => match e {},
        }
    }
}

impl<E: fmt::Debug> fmt::Display for StripError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StripError::InvalidArgument => write!(f, "Invalid argument"),
            StripError::OutOfRange => write!(f, "Index out of range"),
            StripError::OutOfMemory => write!(f, "Pixel buffer capacity exhausted"),
            StripError::Timeout => write!(f, "Timed out waiting for channel"),
            StripError::Channel(e) => write!(f, "Channel error: {:?}", e),
        }
    }
}
