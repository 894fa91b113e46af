//! Script parsing and sanitization.
//!
//! The text-generation collaborator returns one blob containing an optional
//! `Title:` line and the narration body. Parsing pulls the title out;
//! sanitization strips provider attributions and social-media phrasing the
//! model sneaks in despite the system prompt. Sanitization is idempotent.

use regex::Regex;
use std::sync::LazyLock;

/// Narration script with its display title.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelScript {
    pub title: String,
    pub body: String,
}

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title:([^\n]*)").unwrap());
static TITLE_LINE_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title:[^\n]*\n?").unwrap());

static PROVIDER_CREDITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:open\s*ai\s*shorts|shorts\s*by\s*open\s*ai)\b").unwrap()
});
static SELF_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:this\s*is\s*(?:a\s*)?shorts?)\b").unwrap());
static ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:brought\s*to\s*you\s*by|powered\s*by|created\s*by|generated\s*by|presented\s*by)\s*(?:open\s*ai|shorts|gpt\d*)\b",
    )
    .unwrap()
});
static PRODUCED_WITH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:shorts|video|reel)(?:\s*(?:produced|created|made|generated))?\s*(?:by|with|using)\s*(?:open\s*ai|gpt\d*)\b",
    )
    .unwrap()
});
static CALL_TO_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:thanks\s*for\s*watching|subscribe|like|comment)\b").unwrap()
});
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static PROMPT_LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s|\n-\s").unwrap());

impl ReelScript {
    /// Split a raw completion into title and sanitized body.
    ///
    /// A `Title:` line anywhere in the text becomes the title and is removed
    /// from the body. Without one, the title falls back to
    /// `"<name>'s <sport> Legacy"`.
    pub fn parse(content: &str, name: &str, sport: &str) -> Self {
        let title = TITLE_LINE
            .captures(content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| default_title(name, sport));

        let body = TITLE_LINE_STRIP.replace(content, "");
        let body = sanitize(body.trim());

        Self { title, body }
    }

    /// Script excerpt suitable for the reel's description column.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.body.chars().take(max_chars).collect()
    }
}

pub fn default_title(name: &str, sport: &str) -> String {
    format!("{}'s {} Legacy", name, sport)
}

/// Strip attribution/meta phrases and collapse excessive blank lines.
pub fn sanitize(script: &str) -> String {
    let s = PROVIDER_CREDITS.replace_all(script, "");
    let s = SELF_REFERENCE.replace_all(&s, "");
    let s = ATTRIBUTION.replace_all(&s, "");
    let s = PRODUCED_WITH.replace_all(&s, "");
    let s = CALL_TO_ACTION.replace_all(&s, "");
    let s = s.trim();
    EXCESS_NEWLINES.replace_all(s, "\n\n").into_owned()
}

/// Parse an image-prompt completion formatted as a numbered or bulleted list.
///
/// Returns the generic single-prompt fallback when nothing parseable comes
/// back, so callers always get at least one prompt.
pub fn parse_image_prompts(content: &str, name: &str, sport: &str) -> Vec<String> {
    let prompts: Vec<String> = PROMPT_LIST_MARKER
        .split(content)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if prompts.is_empty() {
        vec![fallback_image_prompt(name, sport)]
    } else {
        prompts
    }
}

/// Lowercase with runs of whitespace collapsed to single hyphens. Used for
/// search queries and storage key segments.
pub fn slug(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

pub fn fallback_image_prompt(name: &str, sport: &str) -> String {
    format!(
        "Photorealistic image of {}, professional {} athlete in action, \
         high quality photograph, detailed facial features, 8k, studio lighting",
        name, sport
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------
    // Title parsing
    // -----------------------

    #[test]
    fn test_parse_extracts_title_line() {
        let content = "Title: The GOAT of Soccer\nMessi rewrote every record book.";
        let script = ReelScript::parse(content, "Lionel Messi", "Soccer");

        assert_eq!(script.title, "The GOAT of Soccer");
        assert_eq!(script.body, "Messi rewrote every record book.");
    }

    #[test]
    fn test_parse_title_is_case_insensitive() {
        let content = "TITLE: Air Jordan\nSix rings, five MVPs.";
        let script = ReelScript::parse(content, "Michael Jordan", "Basketball");
        assert_eq!(script.title, "Air Jordan");
    }

    #[test]
    fn test_parse_falls_back_to_synthesized_title() {
        let script = ReelScript::parse("A legendary career.", "Serena Williams", "Tennis");
        assert_eq!(script.title, "Serena Williams's Tennis Legacy");
        assert_eq!(script.body, "A legendary career.");
    }

    #[test]
    fn test_parse_empty_title_line_falls_back() {
        let script = ReelScript::parse("Title:\nSome body text.", "A", "Chess");
        assert_eq!(script.title, "A's Chess Legacy");
    }

    #[test]
    fn test_excerpt_caps_length() {
        let script = ReelScript {
            title: "t".into(),
            body: "x".repeat(300),
        };
        assert_eq!(script.excerpt(255).len(), 255);
    }

    // -----------------------
    // Sanitization
    // -----------------------

    #[test]
    fn test_sanitize_removes_provider_credits() {
        let out = sanitize("Great player. OpenAI shorts presents.");
        assert!(!out.to_lowercase().contains("openai"));
        assert!(!out.to_lowercase().contains("shorts"));
    }

    #[test]
    fn test_sanitize_removes_calls_to_action() {
        let out = sanitize("He won it all. Subscribe and comment! Thanks for watching");
        let lower = out.to_lowercase();
        assert!(!lower.contains("subscribe"));
        assert!(!lower.contains("comment"));
        assert!(!lower.contains("thanks for watching"));
    }

    #[test]
    fn test_sanitize_removes_self_reference() {
        let out = sanitize("This is a short about a champion.");
        assert!(!out.to_lowercase().contains("this is a short"));
    }

    #[test]
    fn test_sanitize_collapses_newlines() {
        let out = sanitize("para one\n\n\n\npara two");
        assert_eq!(out, "para one\n\npara two");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let input = "Brought to you by OpenAI.\n\n\n\nSubscribe now.\nA real fact.";
        let once = sanitize(input);
        let twice = sanitize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitize_keeps_ordinary_text() {
        let input = "He scored 91 goals in 2012, a record that still stands.";
        assert_eq!(sanitize(input), input);
    }

    // -----------------------
    // Image prompt parsing
    // -----------------------

    #[test]
    fn test_parse_numbered_prompts() {
        let content = "1. A close-up portrait\n2. An action shot\n3. A trophy celebration";
        let prompts = parse_image_prompts(content, "n", "s");
        assert_eq!(
            prompts,
            vec![
                "A close-up portrait",
                "An action shot",
                "A trophy celebration"
            ]
        );
    }

    #[test]
    fn test_parse_bulleted_prompts() {
        let content = "intro\n- first prompt\n- second prompt";
        let prompts = parse_image_prompts(content, "n", "s");
        assert_eq!(prompts, vec!["intro", "first prompt", "second prompt"]);
    }

    #[test]
    fn test_slug_lowercases_and_hyphenates() {
        assert_eq!(slug("Lionel Messi"), "lionel-messi");
        assert_eq!(slug("  Table   Tennis "), "table-tennis");
        assert_eq!(slug("Soccer"), "soccer");
    }

    #[test]
    fn test_parse_prompts_falls_back_when_empty() {
        let prompts = parse_image_prompts("   ", "Lionel Messi", "Soccer");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Lionel Messi"));
        assert!(prompts[0].contains("Soccer"));
    }
}
