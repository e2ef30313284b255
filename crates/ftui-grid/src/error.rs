#![forbid(unsafe_code)]

//! Errors raised by the sizing engines.
//!
//! Only invalid configuration is an error. Degenerate geometry (nothing left
//! to redistribute, zero budget) resolves to a no-op and an over-constrained
//! budget resolves to over-size mode; neither reaches this type.

use std::fmt;

use crate::auto_size::AutoSizeMode;
use crate::resize::ResizeMode;

/// Invalid configuration handed to a sizing entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSizingError {
    /// An auto-size strategy was requested for an inactive mode.
    InactiveAutoSizeMode { mode: AutoSizeMode },
    /// Scale mode was requested without a scale factor.
    MissingScale,
    /// The scale factor is not a finite positive number.
    InvalidScale { scale: f64 },
    /// The push-and-pull engine was requested for a caller-side mode.
    InactiveResizeMode { mode: ResizeMode },
    /// No column carries the requested key.
    UnknownColumn { key: String },
}

impl fmt::Display for GridSizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InactiveAutoSizeMode { mode } => {
                write!(f, "auto-size mode {mode:?} has no sizing strategy")
            }
            Self::MissingScale => write!(f, "scale auto-size requires a scale factor"),
            Self::InvalidScale { scale } => {
                write!(f, "scale factor {scale} must be finite and positive")
            }
            Self::InactiveResizeMode { mode } => {
                write!(f, "resize mode {mode:?} is not handled by a sizing engine")
            }
            Self::UnknownColumn { key } => write!(f, "column {key:?} not found"),
        }
    }
}

impl std::error::Error for GridSizingError {}
