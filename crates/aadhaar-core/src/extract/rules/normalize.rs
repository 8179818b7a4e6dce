//! Stateless text transforms, composed into fixed pipelines.
//!
//! Each transform takes the previous output and returns a new string. The
//! name pipeline is shared by the bilingual and the fallback name paths so both
//! clean names in the same order.

use super::patterns::{
    ADDRESS_GUARDIAN, ADDRESS_IDENTIFIER, ADDRESS_PO_PREFIX, ADDRESS_REGION_TRAILER, NEWLINES,
    RELATION_SPLIT, TRAILING_INITIAL, WHITESPACE,
};

/// A single cleanup step.
pub type TextTransform = fn(&str) -> String;

/// Cleanup applied to a raw Latin name line.
pub const NAME_PIPELINE: &[TextTransform] = &[
    strip_relation_suffix,
    strip_trailing_initial,
    collapse_whitespace,
];

/// Cleanup applied to the captured address span.
pub const ADDRESS_PIPELINE: &[TextTransform] = &[
    strip_guardian_fragments,
    strip_identifiers,
    strip_post_office_prefix,
    strip_region_trailer,
    join_lines,
    collapse_whitespace,
    strip_leading_comma,
];

/// Names this short are OCR debris.
const MIN_NAME_CHARS: usize = 3;

/// Run `text` through every transform of `pipeline` in order.
pub fn apply(pipeline: &[TextTransform], text: &str) -> String {
    pipeline
        .iter()
        .fold(text.to_string(), |acc, transform| transform(&acc))
}

/// Clean a raw name; `None` when nothing meaningful is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name = apply(NAME_PIPELINE, raw);
    if name.chars().count() >= MIN_NAME_CHARS {
        Some(name)
    } else {
        None
    }
}

/// Keep only the text before the first S/O, D/O, W/O or C/O marker.
pub fn strip_relation_suffix(text: &str) -> String {
    RELATION_SPLIT
        .split(text)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Drop a dangling relation initial (`... KUMAR S`) left over by OCR.
///
/// Repeats until no trailing initial remains (`... KUMAR S D` loses both),
/// so a second pass over the output is a no-op and [`normalize_name`] stays
/// idempotent.
pub fn strip_trailing_initial(text: &str) -> String {
    let mut out = text.trim().to_string();
    while let Some(m) = TRAILING_INITIAL.find(&out) {
        out.truncate(m.start());
    }
    out
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub fn strip_guardian_fragments(text: &str) -> String {
    ADDRESS_GUARDIAN.replace_all(text.trim(), "").into_owned()
}

pub fn strip_identifiers(text: &str) -> String {
    ADDRESS_IDENTIFIER.replace_all(text, "").into_owned()
}

pub fn strip_post_office_prefix(text: &str) -> String {
    ADDRESS_PO_PREFIX.replace_all(text, "").into_owned()
}

/// Remove `district ...` / `state ...` boilerplate up to the end of its line.
pub fn strip_region_trailer(text: &str) -> String {
    ADDRESS_REGION_TRAILER.replace_all(text, "").into_owned()
}

pub fn join_lines(text: &str) -> String {
    NEWLINES.replace_all(text, " ").trim().to_string()
}

pub fn strip_leading_comma(text: &str) -> String {
    text.strip_prefix(',').unwrap_or(text).trim().to_string()
}
