// SPDX-License-Identifier: GPL-3.0-or-later
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// Which of the two comparison inputs is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
    Both,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left image"),
            Self::Right => f.write_str("right image"),
            Self::Both => f.write_str("left and right images"),
        }
    }
}

/// The ways an image buffer can be unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidImage {
    /// One (or both) of the dimensions is zero.
    Empty { width: u32, height: u32 },

    /// Only gray, RGB, and RGBA buffers are accepted.
    UnsupportedChannels(u8),

    /// The buffer is not `width * height * channels` bytes long.
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for InvalidImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { width, height } => write!(f, "image is empty ({}x{})", width, height),
            Self::UnsupportedChannels(channels) => {
                write!(f, "unsupported channel count {}", channels)
            }
            Self::BufferSize { expected, actual } => write!(
                f,
                "buffer holds {} bytes, but the dimensions require {}",
                actual, expected
            ),
        }
    }
}

pub enum Error {
    InvalidImage(InvalidImage),
    MissingInput(Slot),
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    OutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidImage(e) => f.debug_tuple("InvalidImage").field(e).finish(),
            Self::MissingInput(slot) => f.debug_tuple("MissingInput").field(slot).finish(),
            Self::Decode { path, source } => f
                .debug_struct("Decode")
                .field("path", path)
                .field("source", source)
                .finish(),
            Self::Encode { path, source } => f
                .debug_struct("Encode")
                .field("path", path)
                .field("source", source)
                .finish(),
            Self::OutputDirectory { path, source } => f
                .debug_struct("OutputDirectory")
                .field("path", path)
                .field("source", source)
                .finish(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidImage(e) => write!(f, "Invalid image: {}", e),
            Self::MissingInput(slot) => write!(f, "Nothing to compare, missing the {}", slot),
            Self::Decode { path, source } => {
                write!(f, "Unable to decode {}: {}", path.display(), source)
            }
            Self::Encode { path, source } => {
                write!(f, "Unable to write {}: {}", path.display(), source)
            }
            Self::OutputDirectory { path, source } => write!(
                f,
                "Unable to create output directory {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidImage(_) => None,
            Self::MissingInput(_) => None,
            Self::Decode { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::OutputDirectory { source, .. } => Some(source),
        }
    }
}

impl From<InvalidImage> for Error {
    fn from(e: InvalidImage) -> Self {
        Self::InvalidImage(e)
    }
}
