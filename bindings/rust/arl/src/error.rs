//! Error types for the ARL bindings

use crate::verify::CopyCheck;
use std::ffi::NulError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for ARL operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (output directories, parameter files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The library returned a null record
    #[error("Failed to allocate {0}")]
    Allocation(&'static str),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A string passed to the library contained an interior NUL byte
    #[error("String contains an interior NUL byte: {0}")]
    InteriorNul(#[from] NulError),

    /// FITS export reported a non-zero status
    #[error("FITS export to {} failed with status {status}", .path.display())]
    Fits { path: PathBuf, status: i32 },

    /// Run parameters could not be parsed
    #[error("Invalid run parameters: {0}")]
    Params(#[from] toml::de::Error),

    /// The library reported an image shape with a negative dimension
    #[error("Image shape out of range: {0:?}")]
    ShapeOutOfRange([i32; 4]),

    /// A visibility copy failed verification
    #[error("Visibility copy verification failed: {0}")]
    CopyVerification(CopyCheck),
}

/// Result type alias for ARL operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::ffi::CString;

    #[test]
    fn test_io_has_source() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = Error::from(io_err);

        let source = err.source().expect("Io should have a source");
        assert!(source.is::<io::Error>(), "Source should be io::Error");
    }

    #[test]
    fn test_interior_nul_has_source() {
        let nul = CString::new("results/\0model.fits").unwrap_err();
        let err = Error::from(nul);

        assert!(err.source().is_some(), "InteriorNul should have a source");
    }

    #[test]
    fn test_params_has_source() {
        let toml_err = toml::from_str::<toml::Table>("nfreqs = = 5").unwrap_err();
        let err = Error::from(toml_err);

        assert!(err.source().is_some(), "Params should have a source");
    }

    #[test]
    fn test_fits_message_names_path_and_status() {
        let err = Error::Fits {
            path: PathBuf::from("results/dirty.fits"),
            status: 105,
        };
        let msg = err.to_string();
        assert!(msg.contains("results/dirty.fits"));
        assert!(msg.contains("105"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_copy_verification_has_no_source() {
        let err = Error::CopyVerification(CopyCheck::PayloadMismatch);
        assert!(err.source().is_none());
        assert!(err.to_string().contains("payload"));
    }
}
