use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use lectern_page::{
    LanguageBlock, TranslationGroup, CLASS_EDITABLE, CLASS_SOURCE_TEXT, CLASS_VISIBILITY_ON,
    STYLE_CLASS_SUFFIX,
};
use lectern_settings::{LanguageNameCatalog, SourceLanguageSettings};

use crate::order::smart_order_tabs;
use crate::tabs::{SourceTab, TabStrip, DEFAULT_TAB_THRESHOLD};

static MULTI_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\s+").expect("multi-whitespace pattern"));

/// The materialized bubble for one translation group: its tab strip, any
/// untagged content blocks carried along without tabs, and the tab that
/// starts out selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBubble {
    pub strip: TabStrip,
    /// Text of blocks that carried no language attribute. Kept as content
    /// but never offered as a tab.
    pub untagged: Vec<String>,
    /// Language tag of the initially selected tab.
    pub selected: String,
}

impl SourceBubble {
    /// Every tab's language tag in display order (visible strip, then
    /// overflow dropdown).
    pub fn ordered_tags(&self) -> Vec<&str> {
        self.strip.iter().map(|tab| tab.lang.as_str()).collect()
    }

    pub fn tab_count(&self) -> usize {
        self.strip.len()
    }
}

/// Builds the source bubble for a translation group.
///
/// The builder never mutates the group it is given; each run clones the
/// blocks it keeps and works on the copies, so re-running after rapid edits
/// always starts from the page's current state.
#[derive(Debug, Clone, Copy)]
pub struct BubbleBuilder<'a> {
    settings: &'a SourceLanguageSettings,
    names: &'a LanguageNameCatalog,
    threshold: usize,
}

impl<'a> BubbleBuilder<'a> {
    pub fn new(settings: &'a SourceLanguageSettings, names: &'a LanguageNameCatalog) -> Self {
        Self {
            settings,
            names,
            threshold: DEFAULT_TAB_THRESHOLD,
        }
    }

    /// Overrides the tab count at which overflow folding starts.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Produces the bubble for `group`, or `None` when no source text is
    /// worth showing; a page with only the vernacular language is the
    /// common case, not an error.
    ///
    /// `override_lang` is the tag the author just picked from a bubble
    /// dropdown; it wins the first ordering tier for this rebuild and is
    /// exempt from the already-visible filter.
    pub fn build(
        &self,
        group: &TranslationGroup,
        override_lang: Option<&str>,
    ) -> Option<SourceBubble> {
        let mut blocks = self.clean_blocks(group, override_lang);
        if blocks.is_empty() {
            return None;
        }

        // Stable sort (slice::sort_by) keeps equal and untagged blocks in
        // their original relative order; the promotion pass depends on that.
        let vernacular = self.names.vernacular();
        blocks.sort_by(|a, b| compare_by_language(a.lang(), b.lang(), vernacular));

        smart_order_tabs(&mut blocks, self.settings, override_lang);

        let mut tabs = Vec::new();
        let mut untagged = Vec::new();
        for block in blocks {
            match block.lang {
                Some(lang) => tabs.push(SourceTab {
                    label: self.names.display_name(&lang).to_string(),
                    lang,
                    text: block.text,
                }),
                None => untagged.push(block.text),
            }
        }
        // No tabs means no bubble, even if untagged content survived.
        let first_tag = tabs.first()?.lang.clone();

        let selected = override_lang
            .filter(|tag| tabs.iter().any(|tab| tab.lang == *tag))
            .map(str::to_string)
            .unwrap_or(first_tag);
        let strip = TabStrip::from_tabs(tabs, self.threshold);

        Some(SourceBubble {
            strip,
            untagged,
            selected,
        })
    }

    /// Clones the blocks a bubble may show: drops empty, placeholder, and
    /// already-visible blocks (the vernacular is excluded here, being shown
    /// inline on the page) and makes the kept copies read-only.
    fn clean_blocks(
        &self,
        group: &TranslationGroup,
        override_lang: Option<&str>,
    ) -> Vec<LanguageBlock> {
        group
            .blocks
            .iter()
            .filter(|block| !block.has_no_text() && !block.is_placeholder())
            .filter(|block| {
                !block.is_visible_elsewhere()
                    || (override_lang.is_some() && block.lang() == override_lang)
            })
            .cloned()
            .map(make_read_only)
            .collect()
    }
}

/// Strips editing affordances from a cloned block: author styling, inline
/// sizing, and the editable/visible markers all belong to the page, not the
/// bubble.
fn make_read_only(mut block: LanguageBlock) -> LanguageBlock {
    block.remove_class(CLASS_EDITABLE);
    block.remove_class(CLASS_VISIBILITY_ON);
    block.classes.retain(|c| !c.ends_with(STYLE_CLASS_SUFFIX));
    block.style = None;
    block.add_class(CLASS_SOURCE_TEXT);
    block.text = MULTI_WHITESPACE
        .replace_all(block.text.trim(), " ")
        .into_owned();
    block
}

/// Vernacular first, then ordinal order of tags. Untagged blocks sort after
/// every tagged one.
fn compare_by_language(a: Option<&str>, b: Option<&str>, vernacular: &str) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if a == b {
                Ordering::Equal
            } else if a == vernacular {
                Ordering::Less
            } else if b == vernacular {
                Ordering::Greater
            } else {
                a.cmp(b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LanguageNameCatalog {
        LanguageNameCatalog::new("en")
    }

    fn settings(default: &str) -> SourceLanguageSettings {
        SourceLanguageSettings {
            default_source_language: default.to_string(),
            default_source_language2: None,
            collection_language2: None,
            collection_language3: None,
        }
    }

    #[test]
    fn sort_puts_vernacular_first_then_alphabetical() {
        let mut blocks = vec![
            LanguageBlock::new("tpi", "t"),
            LanguageBlock::new("en", "e"),
            LanguageBlock::new("fr", "f"),
        ];
        blocks.sort_by(|a, b| compare_by_language(a.lang(), b.lang(), "en"));
        let tags: Vec<&str> = blocks.iter().filter_map(LanguageBlock::lang).collect();
        assert_eq!(tags, vec!["en", "fr", "tpi"]);
    }

    #[test]
    fn read_only_copy_collapses_whitespace_and_strips_styling() {
        let block = LanguageBlock {
            lang: Some("fr".to_string()),
            classes: vec![
                CLASS_EDITABLE.to_string(),
                "normal-style".to_string(),
                "big".to_string(),
            ],
            style: Some("min-height: 40px".to_string()),
            text: "  Le   chat \n\t dort  ".to_string(),
        };
        let cleaned = make_read_only(block);
        assert_eq!(cleaned.text, "Le chat dort");
        assert!(!cleaned.has_class(CLASS_EDITABLE));
        assert!(!cleaned.has_class("normal-style"));
        assert!(cleaned.has_class("big"));
        assert!(cleaned.has_class(CLASS_SOURCE_TEXT));
        assert_eq!(cleaned.style, None);
    }

    #[test]
    fn empty_group_produces_no_bubble() {
        let names = catalog();
        let settings = settings("en");
        let builder = BubbleBuilder::new(&settings, &names);
        let group = TranslationGroup::with_blocks(vec![
            LanguageBlock::new("fr", "   "),
            LanguageBlock::new("z", "placeholder"),
            LanguageBlock::new("en", "inline text").with_class(CLASS_VISIBILITY_ON),
        ]);
        assert_eq!(builder.build(&group, None), None);
    }

    #[test]
    fn untagged_only_group_produces_no_bubble() {
        let names = catalog();
        let settings = settings("en");
        let builder = BubbleBuilder::new(&settings, &names);
        let group = TranslationGroup::with_blocks(vec![LanguageBlock::untagged("loose text")]);
        assert_eq!(builder.build(&group, None), None);
    }

    #[test]
    fn override_exempts_visible_language_from_filtering() {
        let names = catalog();
        let settings = settings("en");
        let builder = BubbleBuilder::new(&settings, &names);
        let group = TranslationGroup::with_blocks(vec![
            LanguageBlock::new("fr", "visible ailleurs").with_class(CLASS_VISIBILITY_ON),
            LanguageBlock::new("es", "texto"),
        ]);

        let without = builder.build(&group, None).expect("bubble");
        assert_eq!(without.ordered_tags(), vec!["es"]);

        let with = builder.build(&group, Some("fr")).expect("bubble");
        assert_eq!(with.ordered_tags(), vec!["fr", "es"]);
        assert_eq!(with.selected, "fr");
    }

    #[test]
    fn selection_falls_back_to_first_tab() {
        let names = catalog();
        let settings = settings("en");
        let builder = BubbleBuilder::new(&settings, &names);
        let group = TranslationGroup::with_blocks(vec![
            LanguageBlock::new("fr", "texte"),
            LanguageBlock::new("es", "texto"),
        ]);
        let bubble = builder.build(&group, Some("de")).expect("bubble");
        assert_eq!(bubble.selected, bubble.ordered_tags()[0]);
    }

    #[test]
    fn labels_are_localized_with_tag_fallback() {
        let names = catalog();
        let settings = settings("en");
        let builder = BubbleBuilder::new(&settings, &names);
        let group = TranslationGroup::with_blocks(vec![
            LanguageBlock::new("fr", "texte"),
            LanguageBlock::new("qaa", "texto"),
        ]);
        let bubble = builder.build(&group, None).expect("bubble");
        let labels: Vec<&str> = bubble.strip.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["French", "qaa"]);
    }
}
