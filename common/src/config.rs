use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

/// Configuration file name for the local (working directory) scope.
pub const FILE_NAME_LOCAL: &str = "Rules.toml";
/// Environment variable pointing at an explicit configuration file.
pub const ENV_CONFIG: &str = "RULES_SYNC_CONFIG";

/// Directory created under a target project to hold single rules files.
pub const DEFAULT_RULES_DIR: &str = ".cline";
/// File looked up inside a rules directory, and written at the project root.
pub const DEFAULT_INSTRUCTIONS_FILE: &str = ".copilot-instructions.md";

/// Where rules land inside a target project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Destination directory for file sources, relative to the target.
    pub rules_dir: String,
    /// Fixed file name used for directory sources.
    pub instructions_file: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rules_dir: DEFAULT_RULES_DIR.to_owned(),
            instructions_file: DEFAULT_INSTRUCTIONS_FILE.to_owned(),
        }
    }
}

impl Layout {
    /// Both names must stay inside the target project: `rules_dir` is a
    /// relative path of plain components, `instructions_file` a bare file name.
    pub fn validate(&self) -> Result<(), io::Error> {
        if !is_relative_inside(&self.rules_dir) {
            return Err(invalid(format!(
                "layout.rules_dir must be a relative path inside the project, got {:?}",
                self.rules_dir
            )));
        }
        if !is_relative_inside(&self.instructions_file)
            || Path::new(&self.instructions_file).components().count() != 1
        {
            return Err(invalid(format!(
                "layout.instructions_file must be a plain file name, got {:?}",
                self.instructions_file
            )));
        }
        Ok(())
    }
}

fn is_relative_inside(path: &str) -> bool {
    let mut components = Path::new(path).components().peekable();

    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: Layout,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.layout.validate()?;

        Ok(config)
    }

    /// Load the active configuration.
    ///
    /// An explicit `RULES_SYNC_CONFIG` path must be readable. Otherwise a
    /// `Rules.toml` in the working directory is used when present, falling
    /// back to the defaults.
    pub fn load() -> Result<Self, anyhow::Error> {
        if let Some(path) = env::var_os(ENV_CONFIG) {
            let path = PathBuf::from(path);
            log::debug!("Reading configuration from {}", path.display());

            return Self::read(&path).map_err(|err| {
                anyhow::anyhow!("failed to read configuration {}: {}", path.display(), err)
            });
        }
        Self::local()
    }

    pub fn local() -> Result<Self, anyhow::Error> {
        let path = Path::new(FILE_NAME_LOCAL);

        if !path.exists() {
            return Ok(Self::default());
        }
        log::debug!("Reading configuration from {}", path.display());

        Self::read(path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {}", FILE_NAME_LOCAL, err))
    }
}
