use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in display names for the language tags most collections use.
/// Collections can override or extend these from a names directory.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("ha", "Hausa"),
    ("hi", "Hindi"),
    ("id", "Indonesian"),
    ("km", "Khmer"),
    ("my", "Burmese"),
    ("ne", "Nepali"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sw", "Swahili"),
    ("th", "Thai"),
    ("tpi", "Tok Pisin"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
];

#[derive(Debug, Error)]
pub enum LanguageNameError {
    #[error("failed to enumerate names directory {0}: {1}")]
    ReadDir(PathBuf, io::Error),
    #[error("failed to read names file {0}: {1}")]
    ReadFile(PathBuf, io::Error),
    #[error("failed to parse names file {0}: {1}")]
    ParseFile(PathBuf, serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct NamesFile {
    #[serde(default)]
    names: HashMap<String, String>,
}

/// Resolves language tags to human-readable names, and answers which tag is
/// the collection's vernacular.
///
/// Lookup never fails: a tag with no known name is displayed as itself.
#[derive(Debug, Clone)]
pub struct LanguageNameCatalog {
    vernacular: String,
    names: HashMap<String, String>,
}

impl LanguageNameCatalog {
    /// Builds a catalog seeded with the built-in names.
    pub fn new(vernacular: impl Into<String>) -> Self {
        let names = BUILTIN_NAMES
            .iter()
            .map(|(tag, name)| ((*tag).to_string(), (*name).to_string()))
            .collect();
        Self {
            vernacular: vernacular.into(),
            names,
        }
    }

    /// Builds a catalog and layers overrides from a names directory on top
    /// of the built-in table.
    pub fn load_from_dir(
        vernacular: impl Into<String>,
        dir: impl AsRef<Path>,
    ) -> Result<Self, LanguageNameError> {
        let mut catalog = Self::new(vernacular);
        catalog.load_overrides(dir.as_ref())?;
        Ok(catalog)
    }

    /// Merges every `*.json` names file found under `dir`. A missing
    /// directory is acceptable; the built-in table already covers lookup.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<(), LanguageNameError> {
        match fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries {
                    let entry =
                        entry.map_err(|err| LanguageNameError::ReadDir(dir.to_path_buf(), err))?;
                    let path = entry.path();
                    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                        continue;
                    }
                    let contents = fs::read_to_string(&path)
                        .map_err(|err| LanguageNameError::ReadFile(path.clone(), err))?;
                    let file: NamesFile = serde_json::from_str(&contents)
                        .map_err(|err| LanguageNameError::ParseFile(path.clone(), err))?;
                    self.names.extend(file.names);
                }
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(LanguageNameError::ReadDir(dir.to_path_buf(), err)),
        }
    }

    pub fn insert_name(&mut self, tag: impl Into<String>, name: impl Into<String>) {
        self.names.insert(tag.into(), name.into());
    }

    /// The display name for a tag, or the tag itself when unknown.
    pub fn display_name<'a>(&'a self, tag: &'a str) -> &'a str {
        self.names.get(tag).map(String::as_str).unwrap_or(tag)
    }

    /// The tag considered the vernacular for the current collection.
    pub fn vernacular(&self) -> &str {
        &self.vernacular
    }

    pub fn is_vernacular(&self, tag: &str) -> bool {
        self.vernacular == tag
    }
}
