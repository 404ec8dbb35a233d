use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("target not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    /// Directory creation, copy or metadata update failed.
    #[error("copy failed at {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn copy(path: &Path, source: io::Error) -> Self {
        Self::Copy {
            path: path.to_path_buf(),
            source,
        }
    }
}
