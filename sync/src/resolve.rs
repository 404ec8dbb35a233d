//! Source and target references, resolved to absolute paths.
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rules_common::config::Layout;

use crate::copy::CopyPlan;
use crate::error::Error;

/// Target value meaning "every registered project".
pub const ALL: &str = "all";

/// Absolute form of `path`, with symlinks followed when it exists.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    Ok(fs::canonicalize(&path).unwrap_or(path))
}

/// What the user pointed `--source` at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A single rules file, copied into the project's rules directory.
    File(PathBuf),
    /// A rules directory; only its instructions file is copied.
    Directory(PathBuf),
}

impl Source {
    /// Resolve `path` and classify it. Fails if nothing exists there.
    pub fn resolve(path: &Path) -> Result<Self, Error> {
        let path = absolute(path)?;
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(_) => return Err(Error::SourceNotFound(path)),
        };

        if meta.is_file() {
            Ok(Self::File(path))
        } else {
            Ok(Self::Directory(path))
        }
    }

    /// The concrete file to copy and where it lands under `project`.
    pub fn plan(&self, project: &Path, layout: &Layout) -> Result<CopyPlan, Error> {
        match self {
            Self::File(path) => {
                let name = path.file_name().ok_or_else(|| {
                    Error::copy(
                        path,
                        io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
                    )
                })?;

                Ok(CopyPlan {
                    from: path.clone(),
                    to: project.join(&layout.rules_dir).join(name),
                })
            }
            Self::Directory(path) => Ok(CopyPlan {
                from: path.join(&layout.instructions_file),
                to: project.join(&layout.instructions_file),
            }),
        }
    }
}

/// What the user pointed `--target` at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every registered project. Not available yet.
    All,
    /// A single project directory.
    Project(PathBuf),
}

impl Target {
    /// Resolve a project target to an existing absolute path.
    pub fn resolve(&self) -> Result<Self, Error> {
        match self {
            Self::All => Ok(Self::All),
            Self::Project(path) => {
                let path = absolute(path)?;

                if !path.exists() {
                    return Err(Error::TargetNotFound(path));
                }
                Ok(Self::Project(path))
            }
        }
    }
}

impl From<OsString> for Target {
    fn from(value: OsString) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Project(PathBuf::from(value))
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self::from(OsString::from(value))
    }
}
