//! Output errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors from writing a snapshot.
#[derive(Debug)]
pub enum OutputError {
    /// Filesystem failure while writing `path`.
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The image encoder rejected the frame.
    Encode(image::ImageError),
    /// The field is too large for the image format.
    TooLarge {
        /// Field width.
        width: u32,
        /// Field height.
        height: u32,
    },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "writing {}: {source}", path.display()),
            Self::Encode(e) => write!(f, "encoding bitmap: {e}"),
            Self::TooLarge { width, height } => {
                write!(f, "{width}x{height} field does not fit a bitmap")
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(e) => Some(e),
            Self::TooLarge { .. } => None,
        }
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        Self::Encode(e)
    }
}
