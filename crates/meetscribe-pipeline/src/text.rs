//! Plain-text cleanup for downstream consumers

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s*").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\*\s*").unwrap());

/// Remove markdown syntax for plain-text usage.
///
/// Strips bold markers and heading prefixes and rewrites `*` bullets to
/// `-` bullets; summaries come back from LLM providers as markdown but
/// plain-text consumers need none of it.
pub fn clean_markdown(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    let text = HEADER_RE.replace_all(&text, "");
    let text = BULLET_RE.replace_all(&text, "- ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bold() {
        assert_eq!(clean_markdown("a **bold** word"), "a bold word");
    }

    #[test]
    fn test_strips_headers() {
        assert_eq!(clean_markdown("## Key points\ntext"), "Key points\ntext");
    }

    #[test]
    fn test_rewrites_bullets() {
        assert_eq!(clean_markdown("* first\n* second"), "- first\n- second");
    }

    #[test]
    fn test_mixed_document() {
        let input = "# Summary\n\n**Overview**: short.\n\n* decided X\n* assigned Y\n";
        let expected = "Summary\n\nOverview: short.\n\n- decided X\n- assigned Y";
        assert_eq!(clean_markdown(input), expected);
    }
}
