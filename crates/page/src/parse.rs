use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::group::{LanguageBlock, TranslationGroup, CLASS_HINT_LABEL, CLASS_TRANSLATION_GROUP};

/// Failures raised while lifting translation groups out of a page fragment.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("malformed page fragment at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("invalid attribute in page fragment: {0}")]
    Attribute(#[from] AttrError),
    #[error("invalid attribute value in page fragment: {0}")]
    AttributeValue(#[source] quick_xml::Error),
    #[error("page fragment ended inside an open translation group")]
    Truncated,
}

#[derive(Debug, Default)]
struct ElementAttrs {
    lang: Option<String>,
    classes: Vec<String>,
    style: Option<String>,
}

/// Extracts every translation group from an XHTML-ish page fragment.
///
/// Anything that is not a translation group, a hint label, or a text block
/// is skipped rather than rejected; page templates routinely carry markup
/// this subsystem has no interest in. Only structurally broken XML and a
/// fragment truncated inside a group are errors.
pub fn parse_translation_groups(input: &str) -> Result<Vec<TranslationGroup>, PageError> {
    let mut reader = Reader::from_str(input);

    let mut groups = Vec::new();
    let mut group: Option<TranslationGroup> = None;
    let mut block: Option<LanguageBlock> = None;
    let mut label_text: Option<String> = None;

    // Depth of the element that opened each region, so nested markup inside
    // a block contributes only its text.
    let mut depth = 0usize;
    let mut group_depth = 0usize;
    let mut block_depth = 0usize;
    let mut label_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|source| PageError::Xml {
            position: reader.buffer_position(),
            source,
        })?;
        match event {
            Event::Start(start) => {
                depth += 1;
                let attrs = read_attrs(&start)?;
                if block.is_some() || label_text.is_some() {
                    // Nested markup inside a block or label; only its text matters.
                } else if group.is_some() {
                    let name = start.name();
                    if name.as_ref() == b"label" && attrs.classes.iter().any(|c| c == CLASS_HINT_LABEL) {
                        label_text = Some(String::new());
                        label_depth = depth;
                    } else if name.as_ref() == b"div" || name.as_ref() == b"textarea" {
                        block = Some(LanguageBlock {
                            lang: attrs.lang,
                            classes: attrs.classes,
                            style: attrs.style,
                            text: String::new(),
                        });
                        block_depth = depth;
                    }
                } else if attrs.classes.iter().any(|c| c == CLASS_TRANSLATION_GROUP) {
                    group = Some(TranslationGroup {
                        classes: attrs.classes,
                        style: attrs.style,
                        labels: Vec::new(),
                        blocks: Vec::new(),
                    });
                    group_depth = depth;
                }
            }
            Event::Empty(start) => {
                // Self-closing elements inside a block (line breaks and the
                // like) must not glue adjacent words together.
                if block.is_some() && start.name().as_ref() == b"br" {
                    if let Some(block) = block.as_mut() {
                        block.text.push(' ');
                    }
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|source| PageError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                if let Some(block) = block.as_mut() {
                    block.text.push_str(&text);
                } else if let Some(label) = label_text.as_mut() {
                    label.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(block) = block.as_mut() {
                    block.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if block.is_some() && depth == block_depth {
                    if let (Some(group), Some(block)) = (group.as_mut(), block.take()) {
                        group.blocks.push(block);
                    }
                } else if label_text.is_some() && depth == label_depth {
                    if let (Some(group), Some(label)) = (group.as_mut(), label_text.take()) {
                        group.labels.push(label.trim().to_string());
                    }
                } else if group.is_some() && depth == group_depth {
                    if let Some(group) = group.take() {
                        groups.push(group);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => {
                if group.is_some() {
                    return Err(PageError::Truncated);
                }
                break;
            }
            _ => {}
        }
    }

    Ok(groups)
}

fn read_attrs(start: &BytesStart<'_>) -> Result<ElementAttrs, PageError> {
    let mut attrs = ElementAttrs::default();
    for attr in start.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"lang" => {
                let value = attr.unescape_value().map_err(PageError::AttributeValue)?;
                if !value.is_empty() {
                    attrs.lang = Some(value.into_owned());
                }
            }
            b"class" => {
                let value = attr.unescape_value().map_err(PageError::AttributeValue)?;
                attrs.classes = value.split_whitespace().map(str::to_string).collect();
            }
            b"style" => {
                let value = attr.unescape_value().map_err(PageError::AttributeValue)?;
                attrs.style = Some(value.into_owned());
            }
            _ => {}
        }
    }
    Ok(attrs)
}
