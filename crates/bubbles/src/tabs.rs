/// Tab count at which overflow folding starts. With the default of 3, two
/// tabs stay directly visible and the rest move into the dropdown.
pub const DEFAULT_TAB_THRESHOLD: usize = 3;

/// One selectable language tab: the tag identifies the tab, the label is
/// the localized language name shown to the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTab {
    pub lang: String,
    pub label: String,
    pub text: String,
}

/// Dropdown holding the tabs that did not fit in the visible strip. The
/// affordance shows `count_label`, the number of hidden tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowMenu {
    pub entries: Vec<SourceTab>,
    pub count_label: String,
}

/// The navigable tab strip for one bubble: directly visible tabs plus an
/// optional overflow dropdown. Picking an overflow entry yields its tag,
/// which the caller feeds back as the override for the next rebuild, making
/// that language the promoted first tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStrip {
    pub visible: Vec<SourceTab>,
    pub overflow: Option<OverflowMenu>,
}

impl TabStrip {
    /// Splits an ordered tab list at `threshold`. Below the threshold the
    /// strip is returned unchanged with no dropdown.
    pub fn from_tabs(tabs: Vec<SourceTab>, threshold: usize) -> Self {
        // A threshold under 2 would leave no visible tabs at all.
        let threshold = threshold.max(2);
        if tabs.len() < threshold {
            return Self {
                visible: tabs,
                overflow: None,
            };
        }
        let mut visible = tabs;
        let hidden = visible.split_off(threshold - 1);
        let count_label = hidden.len().to_string();
        Self {
            visible,
            overflow: Some(OverflowMenu {
                entries: hidden,
                count_label,
            }),
        }
    }

    /// Total number of tabs, visible and hidden.
    pub fn len(&self) -> usize {
        self.visible.len()
            + self
                .overflow
                .as_ref()
                .map(|menu| menu.entries.len())
                .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tabs in display order: the visible strip, then the dropdown.
    pub fn iter(&self) -> impl Iterator<Item = &SourceTab> {
        self.visible
            .iter()
            .chain(self.overflow.iter().flat_map(|menu| menu.entries.iter()))
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.iter().any(|tab| tab.lang == lang)
    }

    /// Looks a tab up by tag, whether visible or hidden.
    pub fn find(&self, lang: &str) -> Option<&SourceTab> {
        self.iter().find(|tab| tab.lang == lang)
    }
}
