/// Class marking a container as a translation group.
pub const CLASS_TRANSLATION_GROUP: &str = "translation-group";
/// Class carried by blocks the author can edit in place.
pub const CLASS_EDITABLE: &str = "editable";
/// Class flagging a language that is already displayed on the page itself.
pub const CLASS_VISIBILITY_ON: &str = "visibility-code-on";
/// Class on `<label>` children holding hint text for the author.
pub const CLASS_HINT_LABEL: &str = "bubble";
/// Class applied to blocks once they have been cleaned for bubble display.
pub const CLASS_SOURCE_TEXT: &str = "source-text";
/// Suffix identifying user-style classes (e.g. `normal-style`).
pub const STYLE_CLASS_SUFFIX: &str = "-style";
/// Sentinel language tag on placeholder/prototype blocks.
pub const PROTOTYPE_LANG: &str = "z";

/// One per-language text block inside a translation group.
///
/// `lang` is `None` for malformed blocks that carry no language attribute;
/// such blocks are kept as content but never become tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBlock {
    pub lang: Option<String>,
    pub classes: Vec<String>,
    pub style: Option<String>,
    pub text: String,
}

impl LanguageBlock {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
            classes: Vec::new(),
            style: None,
            text: text.into(),
        }
    }

    /// A block without a language attribute.
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            lang: None,
            classes: Vec::new(),
            style: None,
            text: text.into(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// True when the block contains no meaningful text. An empty paragraph
    /// or whitespace-only content counts as empty.
    pub fn has_no_text(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// True for prototype blocks, which carry the sentinel `z` tag.
    pub fn is_placeholder(&self) -> bool {
        self.lang.as_deref() == Some(PROTOTYPE_LANG)
    }

    /// True when this language is already displayed elsewhere on the page.
    pub fn is_visible_elsewhere(&self) -> bool {
        self.has_class(CLASS_VISIBILITY_ON)
    }
}

/// A container of per-language blocks for one passage, plus any hint labels
/// the page carries for the author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationGroup {
    pub classes: Vec<String>,
    pub style: Option<String>,
    pub labels: Vec<String>,
    pub blocks: Vec<LanguageBlock>,
}

impl TranslationGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<LanguageBlock>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    pub fn push_block(&mut self, block: LanguageBlock) {
        self.blocks.push(block);
    }

    /// Language tags present in the group, in block order.
    pub fn language_tags(&self) -> Vec<&str> {
        self.blocks.iter().filter_map(|b| b.lang()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
