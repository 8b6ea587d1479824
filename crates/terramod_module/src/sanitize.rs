//! Output sanitation for generated artifacts.
//!
//! The backend occasionally violates its output contract: markdown fences,
//! stray backticks, block comments, zero-width characters. Sanitation is a
//! deterministic, idempotent text transform that strips all of it before
//! validation.

use regex::Regex;

use crate::error::{ModuleError, ModuleResult};

// Invisible characters the backend is known to leak into generated text.
const INVISIBLE: &[char] = &[
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{00A0}', '\u{FFFD}',
];

/// Sanitize one raw artifact into clean source text.
///
/// Fails with an encoding error when a non-empty artifact is consumed
/// entirely by sanitation, which means the backend returned nothing but
/// fencing and formatting debris.
pub fn sanitize(raw: &str) -> ModuleResult<String> {
    let clean = clean_text(raw);
    if clean.is_empty() && !raw.trim().is_empty() {
        return Err(ModuleError::Encoding(
            "artifact reduced to empty text after sanitization".to_string(),
        ));
    }
    Ok(clean)
}

fn clean_text(raw: &str) -> String {
    let fences = Regex::new(r"(?s)```[^\n]*\n?(.*?)```").expect("fence pattern is valid");
    let text = fences.replace_all(raw, "$1").into_owned();

    let text = text.replace('`', "");

    let comments = Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern is valid");
    let text = comments.replace_all(&text, "").into_owned();

    // Lossy round-trip through UTF-8, then drop invisible characters and
    // any replacement characters left over from earlier lossy decodes.
    let text: String = String::from_utf8_lossy(text.as_bytes())
        .chars()
        .filter(|c| !INVISIBLE.contains(c))
        .collect();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fences_and_language_tags() {
        let raw = "```hcl\nvariable \"name\" {\n  type = string\n}\n```";
        let clean = sanitize(raw).unwrap();

        assert!(!clean.contains("```"));
        assert!(!clean.contains("hcl"));
        assert!(clean.starts_with("variable \"name\""));
    }

    #[test]
    fn test_strips_inline_backticks() {
        let clean = sanitize("type = `string`").unwrap();
        assert_eq!(clean, "type = string");
    }

    #[test]
    fn test_strips_block_comments() {
        let raw = "/** generated by a helpful assistant */\nresource \"x\" \"y\" {}";
        let clean = sanitize(raw).unwrap();
        assert_eq!(clean, "resource \"x\" \"y\" {}");
    }

    #[test]
    fn test_strips_invisible_characters() {
        let raw = "\u{FEFF}variable \"name\"\u{200B} {}\u{00A0}";
        let clean = sanitize(raw).unwrap();
        assert_eq!(clean, "variable \"name\" {}");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "```hcl\nvariable \"name\" {}\n```",
            "plain text, nothing to strip",
            "/* a */ b `c` \u{200D}",
            "",
        ];

        for raw in samples {
            let once = clean_text(raw);
            let twice = clean_text(&once);
            assert_eq!(once, twice, "sanitization not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(sanitize("").unwrap(), "");
        assert_eq!(sanitize("   \n  ").unwrap(), "");
    }

    #[test]
    fn test_fully_consumed_artifact_is_an_encoding_error() {
        let raw = "``````";
        let err = sanitize(raw).unwrap_err();
        assert!(matches!(err, ModuleError::Encoding(_)));
    }
}
