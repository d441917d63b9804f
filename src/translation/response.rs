/*!
 * Extraction of the XML payload from free-form chat responses.
 *
 * Models are asked to return only the translated XML, but in practice the
 * answer often arrives wrapped in prose and a fenced code block. A response
 * with a fence yields the inner content; a response without one is assumed to
 * be the payload itself and is passed through with a warning.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a fenced code block, optionally tagged `xml`, across lines
static XML_CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:xml)?\s*(.*?)\s*```").expect("fenced block pattern is valid")
});

/// Return the inner content of the first fenced block, if any
pub fn find_fenced_block(raw: &str) -> Option<String> {
    XML_CODE_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the structured payload from a raw chat response.
///
/// Falls back to the raw text unchanged when no fence is present; that case is
/// recoverable and only logged as a warning.
pub fn extract_payload(raw: &str) -> String {
    match find_fenced_block(raw) {
        Some(inner) => inner,
        None => {
            warn!("Response did not contain a fenced XML block, using it as-is: {}", raw);
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_fenced_block_withXmlTag_shouldReturnInnerContent() {
        assert_eq!(
            find_fenced_block("```xml\n<a/>\n```"),
            Some("<a/>".to_string())
        );
    }

    #[test]
    fn test_find_fenced_block_withoutTag_shouldReturnInnerContent() {
        assert_eq!(
            find_fenced_block("```\n<member name=\"T:A\"/>\n```"),
            Some("<member name=\"T:A\"/>".to_string())
        );
    }

    #[test]
    fn test_find_fenced_block_withSurroundingProse_shouldIgnoreProse() {
        let raw = "Here is the translation:\n```xml\n<a>x</a>\n```\nLet me know!";
        assert_eq!(find_fenced_block(raw), Some("<a>x</a>".to_string()));
    }

    #[test]
    fn test_find_fenced_block_withMultilinePayload_shouldKeepInnerLines() {
        let raw = "```xml\n<member name=\"T:A\">\n  <summary>Hi.</summary>\n</member>\n```";
        let inner = find_fenced_block(raw).unwrap();
        assert_eq!(inner, "<member name=\"T:A\">\n  <summary>Hi.</summary>\n</member>");
    }

    #[test]
    fn test_find_fenced_block_withoutFence_shouldReturnNone() {
        assert_eq!(find_fenced_block("<a/>"), None);
    }

    #[test]
    fn test_extract_payload_withoutFence_shouldReturnRawUnchanged() {
        assert_eq!(extract_payload("<a/>"), "<a/>");
    }

    #[test]
    fn test_extract_payload_withFence_shouldReturnInner() {
        assert_eq!(extract_payload("```xml\n<a/>\n```"), "<a/>");
    }
}
