use std::fmt;
use std::path::PathBuf;

/// Which kind of bundled asset a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Audio,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Audio => write!(f, "audio"),
            ResourceKind::Image => write!(f, "image"),
        }
    }
}

/// Errors raised while loading the slideshow or its assets.
///
/// Only the catalog variants are fatal, and only at startup. Everything that
/// can happen while paging degrades to a silent slide or a placeholder image.
#[derive(Debug, thiserror::Error)]
pub enum SlideshowError {
    #[error("{kind} resource not found: {id}")]
    ResourceNotFound { kind: ResourceKind, id: String },

    #[error("Failed to open audio track {id}: {reason}")]
    PlaybackInit { id: String, reason: String },

    #[error("Failed to load image {path:?}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("Slide index {index} out of range for {count} slides")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Invalid slide manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("No slides found in {0:?}")]
    EmptyCatalog(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
