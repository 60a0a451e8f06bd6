//! String casing transforms shared by the builder, serializer and validator.

/// Words kept lowercase in title case unless they begin or end the string.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "nor", "for", "so", "yet", "as", "at", "by", "in", "of",
    "off", "on", "per", "to", "up", "via",
];

/// Acronyms forced to uppercase in title case, matched whole-word and
/// case-insensitively. The regular plural keeps a lowercase `s` suffix.
const ACRONYMS: &[&str] = &[
    "adr", "api", "cli", "cpu", "css", "db", "dns", "faq", "gui", "html", "http", "https", "id",
    "io", "json", "jwt", "madr", "rest", "sdk", "sql", "ssl", "tcp", "ui", "url", "uuid", "ux",
    "xml", "yaml",
];

/// Convert natural-case text to title case.
///
/// The first letter of every space-separated token is capitalized, minor
/// words are lowercased unless they begin or end the string, and known
/// acronyms (including their plural form) are uppercased. Runs of spaces
/// survive unchanged, so the transform is idempotent and safe to compare
/// against the original line.
pub fn title_case(text: &str) -> String {
    let tokens: Vec<&str> = text.split(' ').collect();
    let first = tokens.iter().position(|t| !t.is_empty());
    let last = tokens.iter().rposition(|t| !t.is_empty());

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if token.is_empty() {
                return String::new();
            }
            if let Some(acronym) = acronym_form(token) {
                return acronym;
            }
            let lower = token.to_lowercase();
            if Some(i) != first && Some(i) != last && MINOR_WORDS.contains(&lower.as_str()) {
                return lower;
            }
            capitalize_first(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word acronym lookup, singular or regular plural.
fn acronym_form(token: &str) -> Option<String> {
    let lower = token.to_lowercase();
    if ACRONYMS.contains(&lower.as_str()) {
        return Some(token.to_uppercase());
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if ACRONYMS.contains(&stem) {
            return Some(format!("{}s", stem.to_uppercase()));
        }
    }
    None
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a file-safe identifier from a title: trim, lowercase, collapse
/// runs of spaces and replace them with hyphens.
pub fn to_slug_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.trim().chars() {
        if c == ' ' {
            if !prev_space {
                out.push('-');
            }
            prev_space = true;
        } else {
            out.extend(c.to_lowercase());
            prev_space = false;
        }
    }
    out
}

/// Display form of a slug: every `-word`/`_word` run becomes ` Word`.
///
/// Lossy inverse of [`to_slug_case`]: original capitalization exceptions
/// cannot be recovered. Trailing separator runs are kept verbatim.
pub fn from_slug_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '-' || chars[i] == '_' {
            let start = i;
            while i < chars.len() && (chars[i] == '-' || chars[i] == '_') {
                i += 1;
            }
            if i < chars.len() {
                out.push(' ');
                out.extend(chars[i].to_uppercase());
                i += 1;
            } else {
                out.extend(&chars[start..i]);
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Reduce a free-text title to its short form for loose comparisons.
///
/// Strips, first match wins: a trailing subtitle after `" - "`, `" – "` or
/// `" | "`; a trailing `", e.g."` clause; a parenthetical note running to the
/// end of the string. A single well-formed Markdown link `[label](url)` is
/// then replaced by its label and all backticks are removed. Input that
/// matches none of the patterns is returned unchanged, including malformed
/// bracket sequences.
pub fn short_title(text: &str) -> String {
    let mut s = text;
    if let Some(i) = s.find(" - ") {
        s = &s[..i];
    } else if let Some(i) = s.find(" \u{2013} ") {
        s = &s[..i];
    } else if let Some(i) = s.find(" | ") {
        s = &s[..i];
    } else if let Some(i) = s.find(", e.g.") {
        s = &s[..i];
    } else if s.ends_with(')') {
        if let Some(i) = s.find(" (") {
            s = &s[..i];
        }
    }

    let stripped = strip_markdown_link(s);
    if stripped.contains('`') {
        stripped.replace('`', "")
    } else {
        stripped
    }
}

/// Replace the first well-formed `[label](url)` with `label`. Bracket and
/// parenthesis depth must balance; anything else is left untouched.
fn strip_markdown_link(s: &str) -> String {
    let open = match s.find('[') {
        Some(i) => i,
        None => return s.to_string(),
    };

    let mut depth = 0i32;
    let mut close = None;
    for (i, c) in s[open..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = match close {
        Some(i) => i,
        None => return s.to_string(),
    };

    let paren_start = close + 1;
    if !s[paren_start..].starts_with('(') {
        return s.to_string();
    }
    let mut depth = 0i32;
    let mut paren_close = None;
    for (i, c) in s[paren_start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    paren_close = Some(paren_start + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let paren_close = match paren_close {
        Some(i) => i,
        None => return s.to_string(),
    };

    format!("{}{}{}", &s[..open], &s[open + 1..close], &s[paren_close + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_basic() {
        assert_eq!(title_case("use dashes in file names"), "Use Dashes in File Names");
        assert_eq!(
            title_case("context and problem statement"),
            "Context and Problem Statement"
        );
    }

    #[test]
    fn test_title_case_minor_word_at_boundaries() {
        assert_eq!(title_case("the big decision"), "The Big Decision");
        assert_eq!(title_case("what this is for"), "What This Is For");
    }

    #[test]
    fn test_title_case_acronyms() {
        assert_eq!(title_case("store config as json"), "Store Config as JSON");
        assert_eq!(title_case("use madr for adrs"), "Use MADR for ADRs");
        assert_eq!(title_case("Html and css"), "HTML and CSS");
    }

    #[test]
    fn test_title_case_preserves_space_runs() {
        assert_eq!(title_case("a  b"), "A  B");
    }

    #[test]
    fn test_title_case_idempotent() {
        let samples = [
            "use dashes in file names",
            "## Pros and Cons of the Options",
            "store config as json",
            "A  b   c",
            "",
            "   ",
        ];
        for s in samples {
            let once = title_case(s);
            assert_eq!(title_case(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_title_case_full_heading_line() {
        let line = "## Pros and Cons of the Options";
        assert_eq!(title_case(line), line);
    }

    #[test]
    fn test_to_slug_case() {
        assert_eq!(
            to_slug_case("0005 Use dashes in File names.md"),
            "0005-use-dashes-in-file-names.md"
        );
        assert_eq!(to_slug_case("  Two  Spaces "), "two-spaces");
    }

    #[test]
    fn test_from_slug_case() {
        assert_eq!(
            from_slug_case("0005-use-dashes-in-file-names.md"),
            "0005 Use Dashes In File Names.md"
        );
        assert_eq!(from_slug_case("snake_case_name"), "snake Case Name");
        assert_eq!(from_slug_case("trailing-"), "trailing-");
    }

    #[test]
    fn test_short_title_subtitle_separators() {
        assert_eq!(short_title("Title - subtitle"), "Title");
        assert_eq!(short_title("Title \u{2013} subtitle"), "Title");
        assert_eq!(short_title("Title | subtitle"), "Title");
        assert_eq!(short_title("Use X, e.g. for parsing"), "Use X");
        assert_eq!(short_title("Use X (with caveats)"), "Use X");
    }

    #[test]
    fn test_short_title_markdown_link() {
        assert_eq!(
            short_title("[MADR](https://adr.github.io/madr/) 2.1.2 \u{2013} The Markdown Architectural Decision Records"),
            "MADR 2.1.2"
        );
        assert_eq!(
            short_title("Include in [adr-tools](https://github.com/npryce/adr-tools)"),
            "Include in adr-tools"
        );
    }

    #[test]
    fn test_short_title_backticks() {
        assert_eq!(short_title("Use `serde` everywhere"), "Use serde everywhere");
    }

    #[test]
    fn test_short_title_noop() {
        let samples = [
            "Plain title with no patterns",
            "Unbalanced [bracket only",
            "Bracket ] before [ open",
            "[label] without url",
            "[label](unclosed url",
            "Ends with parens() but no space-paren",
        ];
        for s in samples {
            assert_eq!(short_title(s), s, "expected no-op for {:?}", s);
        }
    }

    #[test]
    fn test_short_title_subtitle_before_link_strip() {
        // Subtitle strip happens first, then the link wrapper goes.
        assert_eq!(short_title("[A](x) - [B](y)"), "A");
    }
}
