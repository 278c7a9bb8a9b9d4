use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

// Runs after ASCII folding, so "…" has already become "...".
static TRAILING_BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\.\.\.\s*more\s+See less|See more\s+See less|\.\.\.)\s*$").unwrap()
});

/// Clean a raw text fragment into a comparable single-line string.
///
/// Folds to ASCII (NFKD, combining marks and other non-ASCII dropped),
/// collapses whitespace runs, strips the "…more / See less" expander
/// artifacts and trailing ellipses, and trims. Idempotent.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let folded: String = raw.nfkd().filter(char::is_ascii).collect();
    let mut s = WHITESPACE_RE.replace_all(&folded, " ").trim().to_string();

    loop {
        let stripped = TRAILING_BOILERPLATE_RE.replace(&s, "");
        let stripped = stripped.trim_end();
        if stripped.len() == s.len() {
            break;
        }
        s = stripped.to_string();
    }

    s
}

/// Remove every `<...>` tag, non-greedily, and trim.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

/// Decode the handful of entities the page serializer emits.
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Serialized markup → plain text (tags stripped, entities decoded).
pub fn markup_to_text(html: &str) -> String {
    decode_entities(&strip_tags(html))
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
