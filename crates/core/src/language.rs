//! Language catalog for guide generation.
//!
//! English is the canonical source language: every destination gets an
//! English guide first, and the target languages below are produced by
//! translating it.

/// Source language for all generated content.
pub const SOURCE_LANGUAGE: &str = "en";

/// Translation targets, in the order the work queue offers them.
///
/// The pairs are (ISO 639-1 code, English name). English itself is not
/// listed here; use [`all_languages`] for the full catalog.
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
];

/// Minimum word count for a freshly generated English guide.
pub const MIN_WORDS_ENGLISH: u32 = 2500;

/// Minimum word count for a translated guide.
pub const MIN_WORDS_TRANSLATION: u32 = 2000;

/// English plus every target language, English first.
pub fn all_languages() -> Vec<&'static str> {
    let mut langs = vec![SOURCE_LANGUAGE];
    langs.extend(TARGET_LANGUAGES.iter().map(|(code, _)| *code));
    langs
}

/// Total number of language versions each destination should end up with.
pub fn language_count() -> usize {
    TARGET_LANGUAGES.len() + 1
}

/// English display name for a language code. Unknown codes fall back to
/// "English", matching the behaviour callers rely on for `en` itself.
pub fn language_name(code: &str) -> &'static str {
    TARGET_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("English")
}

/// Minimum words required for a guide in the given language.
pub fn min_words(code: &str) -> u32 {
    if code == SOURCE_LANGUAGE {
        MIN_WORDS_ENGLISH
    } else {
        MIN_WORDS_TRANSLATION
    }
}
