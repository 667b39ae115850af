//! Per-family language code tables.
//!
//! Each table maps a short language tag at the API boundary ("en", "vi") to
//! the code a given model family expects.

/// NLLB-200 uses FLORES-200 codes.
pub const NLLB_LANGUAGE_CODES: &[(&str, &str)] = &[
    ("en", "eng_Latn"),
    ("vi", "vie_Latn"),
];

/// mBART-50 uses locale-style codes.
pub const MBART_LANGUAGE_CODES: &[(&str, &str)] = &[
    ("en", "en_XX"),
    ("vi", "vi_VN"),
];

/// Multi-target OPUS-MT models pick the output language from a tag prepended to the input.
pub const OPUS_TARGET_TAGS: &[(&str, &str)] = &[
    ("en", ">>eng<<"),
    ("vi", ">>vie<<"),
];

/// Look up `tag` in `table`.
pub fn lookup(table: &'static [(&'static str, &'static str)], tag: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, code)| *code)
}

/// Look up `tag` in `table`, falling back to the tag itself when it is unmapped.
pub fn resolve<'a>(table: &'static [(&'static str, &'static str)], tag: &'a str) -> &'a str {
    lookup(table, tag).unwrap_or(tag)
}
