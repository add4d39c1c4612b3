// File: src/host/render.rs
use crate::core::types::Definition;
use crate::host::actions::OPEN_DICTIONARY;
use crate::host::item::View;

/// Marks the start of the main sense in a definition.
pub const SENSE_SEPARATOR: &str = "▶";
pub const ELLIPSIS: &str = "…";
/// Average glyph width of the launcher's subtitle font, in pixels.
pub const CHAR_WIDTH_PX: f64 = 7.0;

pub const ICON_DICTIONARY: &str = "com.apple.Dictionary";
pub const ICON_DEFINED: &str = "DictionaryOn";
pub const ICON_UNDEFINED: &str = "DictionaryOff";

/// Drops everything up to and including the first sense separator.
pub fn strip_sense_prefix(text: &str) -> &str {
    match text.find(SENSE_SEPARATOR) {
        Some(pos) => &text[pos + SENSE_SEPARATOR.len()..],
        None => text,
    }
}

/// Keeps whole words of `text` while they fit in `width` pixels, ending with
/// an ellipsis when something was cut.
pub fn truncate_to_width(text: &str, width: f64) -> String {
    let max_chars = (width / CHAR_WIDTH_PX).max(0.0) as usize;
    let mut used = 0;
    let mut parts = Vec::new();
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used + len + ELLIPSIS.len() < max_chars {
            parts.push(word);
            used += len + 1;
        } else {
            parts.push(ELLIPSIS);
            break;
        }
    }
    parts.join(" ")
}

/// Fills `view` with the rows for a lookup.
///
/// `query` is the trimmed query, `raw_input` what the user actually typed.
/// With no definitions the only row offers to open the query in the
/// Dictionary app. Otherwise there is a row per definition, plus a row for
/// the query itself when the first definition is not an exact match.
pub fn render_definitions(view: &mut View, query: &str, raw_input: &str, definitions: &[Definition], width: f64) {
    if !query.is_empty() && definitions.is_empty() {
        view.new_item(raw_input)
            .set_icon(ICON_DICTIONARY)
            .run(OPEN_DICTIONARY, query);
        return;
    }

    for definition in definitions {
        let summary = truncate_to_width(strip_sense_prefix(&definition.text), width);
        view.new_item(definition.headword.as_str())
            .set_subtitle(summary)
            .set_icon(ICON_DEFINED)
            .run(OPEN_DICTIONARY, definition.headword.as_str());
    }

    match definitions.first() {
        Some(first) if first.headword != query => {
            view.new_item(query)
                .set_icon(ICON_UNDEFINED)
                .set_subtitle(query)
                .run(OPEN_DICTIONARY, query);
        }
        Some(_) => {
            view.items_mut()[0].set_icon(ICON_DICTIONARY);
        }
        None => {}
    }
}
