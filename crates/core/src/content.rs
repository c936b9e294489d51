//! Content metrics and validation.
//!
//! Word and character counts are recomputed on every save so the stored
//! metadata never drifts from the content. City guides store structured
//! JSON sections, so the counters also walk nested JSON values.

use serde_json::Value;

use crate::error::CoreError;

/// Minimum trimmed character count for a submitted guide.
pub const MIN_CONTENT_CHARS: usize = 1000;

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Character count (chars, not bytes -- guides contain CJK and Arabic text).
pub fn character_count(text: &str) -> u32 {
    text.chars().count() as u32
}

/// Recursively count words in every string nested in a JSON value.
pub fn json_word_count(value: &Value) -> u32 {
    match value {
        Value::String(s) => word_count(s),
        Value::Array(items) => items.iter().map(json_word_count).sum(),
        Value::Object(map) => map.values().map(json_word_count).sum(),
        _ => 0,
    }
}

/// Recursively count characters in every string nested in a JSON value.
pub fn json_character_count(value: &Value) -> u32 {
    match value {
        Value::String(s) => character_count(s),
        Value::Array(items) => items.iter().map(json_character_count).sum(),
        Value::Object(map) => map.values().map(json_character_count).sum(),
        _ => 0,
    }
}

/// Reject guide content shorter than [`MIN_CONTENT_CHARS`] after trimming.
///
/// The error message includes the actual length so workers can log what
/// the model produced.
pub fn validate_guide_content(content: &str) -> Result<(), CoreError> {
    let len = content.trim().chars().count();
    if len < MIN_CONTENT_CHARS {
        return Err(CoreError::Validation(format!(
            "Content is too short (minimum {MIN_CONTENT_CHARS} characters, got {len})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn word_and_char_counts() {
        assert_eq!(word_count("a quick  brown fox"), 4);
        assert_eq!(character_count("golf"), 4);
        // Multibyte characters count as one each.
        assert_eq!(character_count("ゴルフ"), 3);
    }

    #[test]
    fn json_counts_walk_nested_structures() {
        let sections = json!({
            "old town": {
                "description": "three words here",
                "highlights": ["one", "two words"],
                "rating": 5
            }
        });
        assert_eq!(json_word_count(&sections), 6);
        assert_eq!(
            json_character_count(&sections),
            "three words here".len() as u32 + "one".len() as u32 + "two words".len() as u32
        );
    }

    #[test]
    fn short_content_is_rejected_with_actual_length() {
        let err = validate_guide_content("   too short   ").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("minimum 1000 characters"));
        assert!(msg.contains("got 9"));
    }

    #[test]
    fn long_content_passes() {
        let content = "golf ".repeat(300);
        assert!(validate_guide_content(&content).is_ok());
    }
}
