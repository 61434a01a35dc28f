//! Plain-text normalization of HTML notification bodies.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ExtractError;
use crate::text::collapse_lines;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script regex")
});
static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid style regex")
});
static RAW_BLOCK_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(script|style)\b").expect("valid raw block regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!?][^>]*>").expect("valid tag regex"));
static TAG_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!?]").expect("valid tag start regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});").expect("valid entity regex")
});

/// `true` when the content carries an `<html` or `<!doctype html` marker.
#[must_use]
pub fn looks_like_html(content: &str) -> bool {
    let lower = content.to_lowercase();
    lower.contains("<html") || lower.contains("<!doctype html")
}

/// Returns the visible text of HTML content, or the content itself when it
/// is not HTML.
///
/// Malformed HTML is logged and the original content is returned verbatim;
/// the downstream patterns tolerate markup noise.
#[must_use]
pub fn normalize(content: &str) -> String {
    if !looks_like_html(content) {
        return content.to_string();
    }

    match html_to_text(content) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "treating content as plain text");
            content.to_string()
        }
    }
}

/// Strips comments, `script` and `style` blocks, and tags; joins the
/// remaining text nodes with single spaces.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedInput`] for an unterminated comment,
/// `script`/`style` block, or tag.
pub fn html_to_text(html: &str) -> Result<String, ExtractError> {
    let without_comments = COMMENT_RE.replace_all(html, " ");
    if without_comments.contains("<!--") {
        return Err(ExtractError::MalformedInput {
            reason: "unterminated comment".to_string(),
        });
    }

    let without_scripts = SCRIPT_RE.replace_all(&without_comments, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    if let Some(open) = RAW_BLOCK_OPEN_RE.captures(&without_styles) {
        return Err(ExtractError::MalformedInput {
            reason: format!("unterminated <{}> block", open[1].to_lowercase()),
        });
    }

    let mut nodes = Vec::new();
    for segment in TAG_RE.split(&without_styles) {
        if TAG_START_RE.is_match(segment) {
            return Err(ExtractError::MalformedInput {
                reason: "unterminated tag".to_string(),
            });
        }
        let decoded = decode_entities(segment);
        let trimmed = decoded.trim();
        if !trimmed.is_empty() {
            nodes.push(trimmed.to_string());
        }
    }

    Ok(collapse_lines(&nodes.join(" ")))
}

fn decode_entities(segment: &str) -> String {
    ENTITY_RE
        .replace_all(segment, |caps: &Captures<'_>| {
            decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(hex) = body
        .strip_prefix("#x")
        .or_else(|| body.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = body.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "auml" => 'ä',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "Auml" => 'Ä',
        "Ouml" => 'Ö',
        "Uuml" => 'Ü',
        "szlig" => 'ß',
        "euro" => '€',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
