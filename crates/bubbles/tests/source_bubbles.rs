use lectern_bubbles::{BubbleBuilder, SourceBubble};
use lectern_page::{LanguageBlock, TranslationGroup, CLASS_VISIBILITY_ON};
use lectern_settings::{LanguageNameCatalog, SourceLanguageSettings};

/// The canonical fixture: a group holding Spanish, English (the vernacular,
/// shown inline on the page), French, and Tok Pisin.
fn fixture_group() -> TranslationGroup {
    TranslationGroup::with_blocks(vec![
        LanguageBlock::new("es", "La Luna y la Gorra"),
        LanguageBlock::new("en", "The Moon and the Cap").with_class(CLASS_VISIBILITY_ON),
        LanguageBlock::new("fr", "La Lune et la Casquette"),
        LanguageBlock::new("tpi", "Mun na Kep"),
    ])
}

fn settings(
    default: &str,
    default2: Option<&str>,
    language2: Option<&str>,
    language3: Option<&str>,
) -> SourceLanguageSettings {
    SourceLanguageSettings {
        default_source_language: default.to_string(),
        default_source_language2: default2.map(str::to_string),
        collection_language2: language2.map(str::to_string),
        collection_language3: language3.map(str::to_string),
    }
}

fn build(group: &TranslationGroup, prefs: &SourceLanguageSettings) -> SourceBubble {
    let names = LanguageNameCatalog::new("en");
    BubbleBuilder::new(prefs, &names)
        .build(group, None)
        .expect("bubble")
}

#[test]
fn collection_languages_fill_the_prefix() {
    let prefs = settings("en", None, Some("tpi"), Some("fr"));
    let bubble = build(&fixture_group(), &prefs);
    assert_eq!(bubble.ordered_tags(), vec!["tpi", "fr", "es"]);
}

#[test]
fn previous_source_choice_outranks_collection_languages() {
    let prefs = settings("en", Some("fr"), Some("tpi"), None);
    let bubble = build(&fixture_group(), &prefs);
    assert_eq!(bubble.ordered_tags(), vec!["fr", "tpi", "es"]);
}

#[test]
fn duplicate_preference_tiers_promote_once() {
    let prefs = settings("fr", Some("fr"), Some("tpi"), None);
    let bubble = build(&fixture_group(), &prefs);
    assert_eq!(bubble.ordered_tags(), vec!["fr", "tpi", "es"]);
}

#[test]
fn absent_collection_language_is_skipped_silently() {
    let group = TranslationGroup::with_blocks(vec![
        LanguageBlock::new("es", "texto"),
        LanguageBlock::new("tpi", "tok"),
    ]);
    let prefs = settings("tpi", None, Some("fr"), None);
    let bubble = build(&group, &prefs);
    assert_eq!(bubble.ordered_tags(), vec!["tpi", "es"]);
}

#[test]
fn three_tabs_fold_the_last_into_a_dropdown() {
    let prefs = settings("en", None, Some("tpi"), Some("fr"));
    let bubble = build(&fixture_group(), &prefs);

    assert_eq!(bubble.tab_count(), 3);
    let visible: Vec<&str> = bubble.strip.visible.iter().map(|t| t.lang.as_str()).collect();
    assert_eq!(visible, vec!["tpi", "fr"]);
    let menu = bubble.strip.overflow.as_ref().expect("dropdown");
    assert_eq!(menu.entries[0].lang, "es");
    assert_eq!(menu.count_label, "1");
}

#[test]
fn two_tabs_stay_fully_visible() {
    let group = TranslationGroup::with_blocks(vec![
        LanguageBlock::new("tpi", "tok"),
        LanguageBlock::new("fr", "texte"),
    ]);
    let prefs = settings("tpi", None, None, None);
    let bubble = build(&group, &prefs);

    assert_eq!(bubble.tab_count(), 2);
    assert!(bubble.strip.overflow.is_none());
}

#[test]
fn no_tag_appears_twice() {
    // Every preference tier resolves to a present language.
    let prefs = settings("tpi", Some("fr"), Some("fr"), Some("es"));
    let bubble = build(&fixture_group(), &prefs);

    let mut tags = bubble.ordered_tags();
    let total = tags.len();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), total);
}

#[test]
fn unpromoted_tabs_keep_alphabetical_order() {
    let group = TranslationGroup::with_blocks(vec![
        LanguageBlock::new("de", "Text"),
        LanguageBlock::new("es", "texto"),
        LanguageBlock::new("fr", "texte"),
        LanguageBlock::new("id", "teks"),
        LanguageBlock::new("tpi", "tok"),
    ]);
    let prefs = settings("id", None, Some("fr"), None);
    let bubble = build(&group, &prefs);

    let ordered = bubble.ordered_tags();
    assert_eq!(ordered[..2], ["id", "fr"]);
    // Strip the promoted tags; the remainder must match the input order.
    let rest: Vec<&str> = ordered[2..].to_vec();
    assert_eq!(rest, vec!["de", "es", "tpi"]);
}

#[test]
fn primary_language_lands_at_index_zero() {
    let prefs = settings("tpi", None, None, None);
    let bubble = build(&fixture_group(), &prefs);
    assert_eq!(bubble.ordered_tags()[0], "tpi");
    assert_eq!(bubble.selected, "tpi");
}

#[test]
fn dropdown_pick_becomes_the_promoted_tab() {
    let names = LanguageNameCatalog::new("en");
    let prefs = settings("en", None, Some("tpi"), Some("fr"));
    let builder = BubbleBuilder::new(&prefs, &names);

    let first = builder.build(&fixture_group(), None).expect("bubble");
    let hidden_tag = first.strip.overflow.as_ref().expect("dropdown").entries[0]
        .lang
        .clone();
    assert_eq!(hidden_tag, "es");

    // The author picks the hidden language; a rebuild with that override
    // promotes it to the first, selected tab.
    let second = builder
        .build(&fixture_group(), Some(&hidden_tag))
        .expect("bubble");
    assert_eq!(second.ordered_tags()[0], "es");
    assert_eq!(second.selected, "es");
}

#[test]
fn rebuilding_from_the_output_is_a_fixed_point() {
    let names = LanguageNameCatalog::new("en");
    let prefs = settings("en", None, Some("tpi"), Some("fr"));
    let builder = BubbleBuilder::new(&prefs, &names);
    let bubble = builder.build(&fixture_group(), None).expect("bubble");

    // Feed the bubble's own blocks back through the builder.
    let echo = TranslationGroup::with_blocks(
        bubble
            .strip
            .iter()
            .map(|tab| LanguageBlock::new(tab.lang.clone(), tab.text.clone()))
            .collect(),
    );
    let rebuilt = builder.build(&echo, None).expect("bubble");
    assert_eq!(rebuilt.ordered_tags(), bubble.ordered_tags());
    assert_eq!(rebuilt.strip, bubble.strip);
}

#[test]
fn vernacular_only_group_yields_no_bubble() {
    let group = TranslationGroup::with_blocks(vec![LanguageBlock::new("en", "The Moon and the Cap")
        .with_class(CLASS_VISIBILITY_ON)]);
    let names = LanguageNameCatalog::new("en");
    let prefs = settings("en", None, None, None);
    assert!(BubbleBuilder::new(&prefs, &names)
        .build(&group, None)
        .is_none());
}
