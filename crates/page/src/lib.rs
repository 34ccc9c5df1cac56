//! Page-document model shared by the Lectern editing surface.
//!
//! A book page contains one or more translation groups, each holding the
//! per-language text blocks for a single passage. This crate provides the
//! value types for those groups (`TranslationGroup`, `LanguageBlock`) and a
//! parser that lifts them out of the XHTML-ish page fragments the editing
//! surface works with. The types are plain owned values; pipelines that
//! consume them clone and transform copies rather than mutating the page.

pub mod group;
pub mod parse;

pub use group::{
    LanguageBlock, TranslationGroup, CLASS_EDITABLE, CLASS_HINT_LABEL, CLASS_SOURCE_TEXT,
    CLASS_TRANSLATION_GROUP, CLASS_VISIBILITY_ON, PROTOTYPE_LANG, STYLE_CLASS_SUFFIX,
};
pub use parse::{parse_translation_groups, PageError};
