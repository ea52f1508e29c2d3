use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up at the module root.
pub const CONFIG_FILE_NAME: &str = ".lesson-lint.toml";

/// Configuration for validating a curriculum module.
///
/// Every field has a default matching the curriculum's conventions, so a
/// module without a configuration file validates as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// File name of the English document in a pair.
    english_document: String,

    /// File name of the Indonesian document in a pair.
    translated_document: String,

    /// Directory holding the exercises, relative to the module root.
    exercises_dir: String,

    /// Top-level directories that are never lessons.
    ///
    /// The exercises directory is always excluded as well.
    pub non_lesson_dirs: Vec<String>,

    /// Directory names skipped entirely while scanning.
    ///
    /// Hidden directories (leading `.`) are always skipped.
    pub ignored_dirs: Vec<String>,

    /// Maximum recursion depth for the pairing scan. `None` is unlimited.
    pub max_depth: Option<usize>,

    /// Whether headings inside fenced code blocks are ignored.
    pub ignore_fenced_code: bool,

    /// Whether a missing "Module Home" link fails navigation completeness.
    ///
    /// When `false` (default) it is reported as a warning.
    pub require_module_home: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            english_document: default_english_document(),
            translated_document: default_translated_document(),
            exercises_dir: default_exercises_dir(),
            non_lesson_dirs: default_non_lesson_dirs(),
            ignored_dirs: default_ignored_dirs(),
            max_depth: None,
            ignore_fenced_code: true,
            require_module_home: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `.lesson-lint.toml` from `root`, falling back to the defaults.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("{e}; using defaults");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File name of the English document, `README.md` by default.
    #[must_use]
    pub fn english_document(&self) -> &str {
        &self.english_document
    }

    /// File name of the Indonesian document, `README_ID.md` by default.
    #[must_use]
    pub fn translated_document(&self) -> &str {
        &self.translated_document
    }

    /// Exercise directory name, relative to the module root.
    #[must_use]
    pub fn exercises_dir(&self) -> &str {
        &self.exercises_dir
    }

    /// Returns `true` if a directory with this name is never scanned.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Returns `true` if a top-level directory with this name is not a lesson.
    #[must_use]
    pub fn is_non_lesson(&self, name: &str) -> bool {
        name == self.exercises_dir || self.non_lesson_dirs.iter().any(|d| d == name)
    }
}

/// Errors reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

fn default_english_document() -> String {
    "README.md".to_string()
}

fn default_translated_document() -> String {
    "README_ID.md".to_string()
}

fn default_exercises_dir() -> String {
    "exercises".to_string()
}

fn default_non_lesson_dirs() -> Vec<String> {
    ["validation", "assets", "images"]
        .map(String::from)
        .to_vec()
}

fn default_ignored_dirs() -> Vec<String> {
    ["node_modules", "target"].map(String::from).to_vec()
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_english_document")]
        english_document: String,

        #[serde(default = "default_translated_document")]
        translated_document: String,

        #[serde(default = "default_exercises_dir")]
        exercises_dir: String,

        #[serde(default = "default_non_lesson_dirs")]
        non_lesson_dirs: Vec<String>,

        #[serde(default = "default_ignored_dirs")]
        ignored_dirs: Vec<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_depth: Option<usize>,

        #[serde(default = "default_true")]
        ignore_fenced_code: bool,

        #[serde(default)]
        require_module_home: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                english_document,
                translated_document,
                exercises_dir,
                non_lesson_dirs,
                ignored_dirs,
                max_depth,
                ignore_fenced_code,
                require_module_home,
            } => Self {
                english_document,
                translated_document,
                exercises_dir,
                non_lesson_dirs,
                ignored_dirs,
                max_depth,
                ignore_fenced_code,
                require_module_home,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            english_document: config.english_document,
            translated_document: config.translated_document,
            exercises_dir: config.exercises_dir,
            non_lesson_dirs: config.non_lesson_dirs,
            ignored_dirs: config.ignored_dirs,
            max_depth: config.max_depth,
            ignore_fenced_code: config.ignore_fenced_code,
            require_module_home: config.require_module_home,
        }
    }
}
