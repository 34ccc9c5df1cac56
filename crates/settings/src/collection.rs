use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const COLLECTION_SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CollectionSettingsError {
    #[error("failed to read collection settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse collection settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize collection settings {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write collection settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A language configured at the collection level: its tag plus an optional
/// display name chosen by the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl LanguageDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: None,
        }
    }

    pub fn named(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: Some(name.into()),
        }
    }
}

/// Ordering preferences for source-text bubbles. The structure is read-only
/// for the bubble pipeline; only the host application mutates it (when the
/// author picks a language from a bubble's dropdown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLanguageSettings {
    /// Most recently used source language; first ordering tier.
    #[serde(default = "default_source_language")]
    pub default_source_language: String,
    /// The choice before that; promoted when the first choice is absent
    /// from a group (or already placed).
    #[serde(default)]
    pub default_source_language2: Option<String>,
    /// Second collection language, if the collection has one.
    #[serde(default)]
    pub collection_language2: Option<String>,
    /// Third collection language, if the collection has one.
    #[serde(default)]
    pub collection_language3: Option<String>,
}

fn default_source_language() -> String {
    "en".to_string()
}

impl Default for SourceLanguageSettings {
    fn default() -> Self {
        Self {
            default_source_language: default_source_language(),
            default_source_language2: None,
            collection_language2: None,
            collection_language3: None,
        }
    }
}

impl SourceLanguageSettings {
    fn sanitize(&mut self) {
        if self.default_source_language.trim().is_empty() {
            self.default_source_language = default_source_language();
        }
        normalize_optional(&mut self.default_source_language2);
        normalize_optional(&mut self.collection_language2);
        normalize_optional(&mut self.collection_language3);
    }
}

fn normalize_optional(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

/// Per-collection configuration consumed by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    /// The language the book is being authored in. Its text is shown inline
    /// on the page, never in a source bubble.
    #[serde(default = "default_vernacular")]
    pub vernacular: LanguageDescriptor,
    #[serde(default)]
    pub source_languages: SourceLanguageSettings,
}

fn default_version() -> u32 {
    COLLECTION_SETTINGS_VERSION
}

fn default_vernacular() -> LanguageDescriptor {
    LanguageDescriptor::new("en")
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            version: COLLECTION_SETTINGS_VERSION,
            vernacular: default_vernacular(),
            source_languages: SourceLanguageSettings::default(),
        }
    }
}

impl CollectionSettings {
    pub fn sanitize(&mut self) {
        if self.version == 0 {
            self.version = COLLECTION_SETTINGS_VERSION;
        }
        if self.vernacular.tag.trim().is_empty() {
            self.vernacular = default_vernacular();
        }
        self.source_languages.sanitize();
    }

    /// Records a language the author explicitly selected so the next bubble
    /// rebuild promotes it first. The previous choice is remembered as the
    /// second-tier fallback.
    pub fn record_source_language_choice(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if tag != self.source_languages.default_source_language {
            self.source_languages.default_source_language2 =
                Some(std::mem::replace(
                    &mut self.source_languages.default_source_language,
                    tag,
                ));
        }
        self.source_languages.sanitize();
    }
}

/// Loads and persists `CollectionSettings` as JSON at a fixed path.
#[derive(Debug)]
pub struct CollectionSettingsStore {
    path: PathBuf,
    data: CollectionSettings,
}

impl CollectionSettingsStore {
    pub fn new(path: impl Into<PathBuf>, settings: CollectionSettings) -> Self {
        Self {
            path: path.into(),
            data: settings,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CollectionSettingsError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            let mut data = CollectionSettings::default();
            data.sanitize();
            return Ok(Self { path, data });
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| CollectionSettingsError::Read {
                path: path.clone(),
                source,
            })?;
        let mut data: CollectionSettings =
            serde_json::from_str(&contents).map_err(|source| CollectionSettingsError::Parse {
                path: path.clone(),
                source,
            })?;
        data.sanitize();
        Ok(Self { path, data })
    }

    pub fn settings(&self) -> &CollectionSettings {
        &self.data
    }

    pub fn update<F>(&mut self, mut op: F) -> Result<(), CollectionSettingsError>
    where
        F: FnMut(&mut CollectionSettings),
    {
        op(&mut self.data);
        self.data.sanitize();
        self.save()
    }

    pub fn save(&self) -> Result<(), CollectionSettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| CollectionSettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(&self.data).map_err(|source| {
            CollectionSettingsError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload.as_bytes()).map_err(|source| {
            CollectionSettingsError::Write {
                path: tmp_path.clone(),
                source,
            }
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| CollectionSettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
