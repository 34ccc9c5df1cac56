pub mod collection;
pub mod language_names;

pub use collection::{
    CollectionSettings, CollectionSettingsError, CollectionSettingsStore, LanguageDescriptor,
    SourceLanguageSettings,
};
pub use language_names::{LanguageNameCatalog, LanguageNameError};
