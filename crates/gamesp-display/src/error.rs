//! Error types for the driver

use crate::interface::DisplayInterface;

/// Errors that can occur when talking to the panel.
///
/// Generic over the interface type to preserve the specific bus error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Bus-level error (SPI/I2C/GPIO), wrapping the interface's own type.
    Interface(I::Error),
    /// The flush buffer is smaller than the panel needs.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(_) => write!(f, "Interface error"),
            Error::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified.
    MissingDimensions,
    /// Dimensions out of range for the controller, or not page-aligned for
    /// a monochrome panel.
    InvalidDimensions {
        /// Width (columns) requested
        cols: u16,
        /// Height (rows) requested
        rows: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingDimensions => write!(f, "Dimensions must be specified"),
            BuilderError::InvalidDimensions { cols, rows } => {
                write!(f, "Invalid dimensions: {cols}x{rows}")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
