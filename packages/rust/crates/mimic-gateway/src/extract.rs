//! Pull the translated text out of the remote's mobile result page.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RESULT_CONTAINER: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r#"(?s)<div[^>]*\bclass="result-container"[^>]*>(.*?)</div>"#).ok()
});

static ENTITY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").ok());

/// Text of the `result-container` element, entities decoded.
///
/// Returns `None` when the element is missing or holds only whitespace.
#[must_use]
pub fn extract_translation(page: &str) -> Option<String> {
    let container = RESULT_CONTAINER.as_ref()?;
    let inner = container.captures(page)?.get(1)?.as_str();
    let text = decode_entities(inner);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Decode named and numeric character references; unknown ones are kept verbatim.
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    let Some(entity) = ENTITY.as_ref() else {
        return raw.to_string();
    };
    entity
        .replace_all(raw, |caps: &Captures<'_>| {
            decode_one(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_one(name: &str) -> Option<char> {
    if let Some(hex) = name
        .strip_prefix("#x")
        .or_else(|| name.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(decimal) = name.strip_prefix('#') {
        return decimal.parse::<u32>().ok().and_then(char::from_u32);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_result_container_text() {
        let page = r#"<html><body><div class="translate"><div class="result-container">おはようございます</div></div></body></html>"#;
        assert_eq!(extract_translation(page).as_deref(), Some("おはようございます"));
    }

    #[test]
    fn decodes_entities_in_result() {
        let page = r#"<div class="result-container">Tom &amp; Jerry &#39;s &quot;day&quot; &#x3042;</div>"#;
        assert_eq!(
            extract_translation(page).as_deref(),
            Some("Tom & Jerry 's \"day\" あ")
        );
    }

    #[test]
    fn missing_or_blank_container_is_none() {
        assert_eq!(extract_translation("<html>rate limited</html>"), None);
        assert_eq!(
            extract_translation(r#"<div class="result-container">   </div>"#),
            None
        );
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(decode_entities("a &bogus; b"), "a &bogus; b");
    }
}
