//! Loading and saving language files.
//!
//! A language file is any serde struct whose fields are [`TextDocument`]s
//! (or anything else serde can handle). Each document is stored as a string
//! for one line and as a list of strings for several:
//!
//! ```json
//! {
//!   "welcome": "&aWelcome, {player}!",
//!   "rules": [
//!     "&61. Be nice",
//!     "&62. Have fun"
//!   ]
//! }
//! ```
//!
//! The usual setup writes the defaults on first run and picks up edits after:
//!
//! ```rust,no_run
//! use parlance::{Loader, TextDocument};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(default)]
//! struct Lang {
//!     welcome: TextDocument,
//!     rules: TextDocument,
//! }
//!
//! impl Default for Lang {
//!     fn default() -> Self {
//!         Self {
//!             welcome: "&aWelcome, {player}!".into(),
//!             rules: TextDocument::new(["&61. Be nice", "&62. Have fun"]),
//!         }
//!     }
//! }
//!
//! let lang: Lang = Loader::new().load_or_initialize("lang/en.json", Lang::default)?;
//! println!("{}", lang.welcome.substitute_plain([("player", "Ada")]));
//! # Ok::<(), parlance::LoadError>(())
//! ```
//!
//! [`TextDocument`]: crate::TextDocument

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{LoadError, Result};

/// The serialization format of a language file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Guesses the format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

/// Reads and writes language structs as JSON or YAML.
///
/// Defaults to pretty-printed JSON. The loader holds no state besides its
/// settings, so one value can be shared across the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loader {
    format: Format,
    pretty: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            format: Format::Json,
            pretty: true,
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file format.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Pretty-prints JSON output. YAML output is always block style.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn get_format(&self) -> Format {
        self.format
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Serializes a value to a string.
    pub fn to_string<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = match self.format {
            Format::Json if self.pretty => serde_json::to_string_pretty(value)?,
            Format::Json => serde_json::to_string(value)?,
            Format::Yaml => serde_yaml::to_string(value)?,
        };
        Ok(text)
    }

    /// Deserializes a value from a string.
    pub fn from_str<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let value = match self.format {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(value)
    }

    /// Writes a value to `path` as UTF-8, creating parent directories.
    pub fn save_file<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_string(value)?;
        create_parent_dirs(path)?;
        fs::write(path, text).map_err(|e| LoadError::io(path, e))?;
        tracing::debug!(path = %path.display(), format = self.format.name(), "saved language file");
        Ok(())
    }

    /// Reads a value from `path`.
    ///
    /// A missing file is created empty. An empty file, or one holding only
    /// a null, yields `Ok(None)`.
    pub fn load_file<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<Option<T>> {
        let path = path.as_ref();
        if !path.exists() {
            create_parent_dirs(path)?;
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoadError::io(path, e))?;
            tracing::debug!(path = %path.display(), "created empty language file");
            return Ok(None);
        }

        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        if text.trim().is_empty() {
            tracing::debug!(path = %path.display(), "language file is empty");
            return Ok(None);
        }

        let value: Option<T> = self.from_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            format = self.format.name(),
            loaded = value.is_some(),
            "read language file"
        );
        Ok(value)
    }

    /// Loads `path`, or builds a value with `default` if there is nothing
    /// to load.
    pub fn load_or_construct<T, D>(&self, path: impl AsRef<Path>, default: D) -> Result<T>
    where
        T: DeserializeOwned,
        D: FnOnce() -> T,
    {
        Ok(self.load_file(path)?.unwrap_or_else(default))
    }

    /// Like [`load_or_construct`](Self::load_or_construct), then writes the
    /// result back so the file always reflects the current struct layout.
    pub fn load_or_initialize<T, D>(&self, path: impl AsRef<Path>, default: D) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        D: FnOnce() -> T,
    {
        let path = path.as_ref();
        let value = self.load_or_construct(path, default)?;
        self.save_file(path, &value)?;
        Ok(value)
    }
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| LoadError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextDocument;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Lang {
        greeting: TextDocument,
        help: TextDocument,
    }

    fn lang() -> Lang {
        Lang {
            greeting: TextDocument::from("&aHi {name}"),
            help: TextDocument::new(["one", "two"]),
        }
    }

    mod config {
        use super::*;

        #[test]
        fn test_defaults() {
            let loader = Loader::new();
            assert_eq!(loader.get_format(), Format::Json);
            assert!(loader.is_pretty());
        }

        #[test]
        fn test_builder() {
            let loader = Loader::new().format(Format::Yaml).pretty(false);
            assert_eq!(loader.get_format(), Format::Yaml);
            assert!(!loader.is_pretty());
        }

        #[test]
        fn test_format_from_path() {
            assert_eq!(Format::from_path("en.json"), Some(Format::Json));
            assert_eq!(Format::from_path("lang/en.YML"), Some(Format::Yaml));
            assert_eq!(Format::from_path("en.yaml"), Some(Format::Yaml));
            assert_eq!(Format::from_path("en.toml"), None);
            assert_eq!(Format::from_path("en"), None);
        }
    }

    mod strings {
        use super::*;

        #[test]
        fn test_compact_json() {
            let text = Loader::new().pretty(false).to_string(&lang()).unwrap();
            assert_eq!(text, r#"{"greeting":"&aHi {name}","help":["one","two"]}"#);
        }

        #[test]
        fn test_pretty_json_round_trip() {
            let loader = Loader::new();
            let text = loader.to_string(&lang()).unwrap();
            assert!(text.contains('\n'));
            let back: Lang = loader.from_str(&text).unwrap();
            assert_eq!(back, lang());
        }

        #[test]
        fn test_yaml_round_trip() {
            let loader = Loader::new().format(Format::Yaml);
            let text = loader.to_string(&lang()).unwrap();
            let back: Lang = loader.from_str(&text).unwrap();
            assert_eq!(back, lang());
        }

        #[test]
        fn test_invalid_json_is_error() {
            let result: Result<Lang> = Loader::new().from_str("{\"greeting\": {}}");
            assert!(matches!(result, Err(LoadError::Json(_))));
        }

        #[test]
        fn test_invalid_yaml_is_error() {
            let result: Result<Lang> = Loader::new().format(Format::Yaml).from_str("greeting: [[x]]\nhelp: y\n");
            assert!(matches!(result, Err(LoadError::Yaml(_))));
        }
    }
}
