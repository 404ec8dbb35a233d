//! Metadata-preserving single file copy.
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::{set_file_times, FileTime};

use crate::error::Error;

/// A resolved (source file, destination file) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlan {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl CopyPlan {
    /// File name of the copied file, for display.
    pub fn name(&self) -> Cow<'_, str> {
        self.from
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.from.to_string_lossy())
    }

    /// Whether the file to copy is present.
    pub fn is_ready(&self) -> bool {
        self.from.is_file()
    }

    /// Create missing parent directories of the destination, then copy,
    /// overwriting any existing destination file.
    ///
    /// Nothing is created if the source file is missing.
    pub fn apply(&self) -> Result<(), Error> {
        let meta = fs::metadata(&self.from).map_err(|e| Error::copy(&self.from, e))?;
        if !meta.is_file() {
            return Err(Error::copy(
                &self.from,
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        if self.is_same_file()? {
            return Err(Error::copy(
                &self.to,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "source and destination are the same file",
                ),
            ));
        }

        if let Some(parent) = self.to.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::copy(parent, e))?;
        }
        fs::copy(&self.from, &self.to).map_err(|e| Error::copy(&self.to, e))?;
        preserve(&meta, &self.to).map_err(|e| Error::copy(&self.to, e))?;

        log::debug!("Copied {} to {}", self.from.display(), self.to.display());

        Ok(())
    }

    /// Compares file identity (device and inode on unix), so symlinks and
    /// hard links onto the source are caught too.
    fn is_same_file(&self) -> Result<bool, Error> {
        if !self.to.exists() {
            return Ok(false);
        }
        same_file::is_same_file(&self.from, &self.to).map_err(|e| Error::copy(&self.to, e))
    }
}

/// Apply the source's permissions and access/modification times to `to`.
fn preserve(meta: &fs::Metadata, to: &Path) -> io::Result<()> {
    fs::set_permissions(to, meta.permissions())?;
    set_file_times(
        to,
        FileTime::from_last_access_time(meta),
        FileTime::from_last_modification_time(meta),
    )
}
