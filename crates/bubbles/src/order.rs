use lectern_page::LanguageBlock;
use lectern_settings::SourceLanguageSettings;

/// Reorders a sorted block list so the author's preferred languages come
/// first: the most recently used source language (or the explicit
/// `override_lang` when the author just picked one), then the choice before
/// that, then collection language 2, then collection language 3. Everything
/// else keeps its alphabetical position.
///
/// Each tier claims the next slot only if its language is actually present;
/// absent tags are skipped silently. A tag that already satisfied an earlier
/// tier is left alone, so no language is promoted twice.
pub fn smart_order_tabs(
    blocks: &mut Vec<LanguageBlock>,
    settings: &SourceLanguageSettings,
    override_lang: Option<&str>,
) {
    let primary = override_lang.unwrap_or(&settings.default_source_language);
    let mut destination = 0;

    do_safe_replace_in_list(blocks, primary, destination);
    if lang_at(blocks, destination) == Some(primary) {
        destination += 1;
    }

    if let Some(previous) = settings.default_source_language2.as_deref() {
        if previous != primary {
            do_safe_replace_in_list(blocks, previous, destination);
            if lang_at(blocks, destination) == Some(previous) {
                destination += 1;
            }
        }
    }

    if let Some(language2) = settings.collection_language2.as_deref() {
        if language2 != primary {
            do_safe_replace_in_list(blocks, language2, destination);
            if lang_at(blocks, destination) == Some(language2) {
                destination += 1;
            }
        }
    }

    if let Some(language3) = settings.collection_language3.as_deref() {
        if language3 != primary {
            do_safe_replace_in_list(blocks, language3, destination);
        }
    }
}

/// If a block with `tag` occurs after `position`, moves it to `position`.
/// A block already at or before `position` stays put; relative order of all
/// other blocks is preserved.
pub(crate) fn do_safe_replace_in_list(blocks: &mut Vec<LanguageBlock>, tag: &str, position: usize) {
    let found = blocks
        .iter()
        .enumerate()
        .find(|(idx, block)| *idx > position && block.lang() == Some(tag))
        .map(|(idx, _)| idx);
    if let Some(idx) = found {
        let block = blocks.remove(idx);
        blocks.insert(position, block);
    }
}

fn lang_at(blocks: &[LanguageBlock], position: usize) -> Option<&str> {
    blocks.get(position).and_then(LanguageBlock::lang)
}
