//! Similarity checks of increasing permissiveness, used to reconcile
//! independently-authored titles, e.g. a chosen-option statement against the
//! considered-options list.
//!
//! Callers check [`matches_exact`] first and only fall back to the looser
//! checks when it fails; both looser checks subsume the exact one so an
//! exact match is never shadowed by a loose prefix coincidence.

use crate::casing::short_title;

/// Normalized comparison form: all whitespace removed, lowercased.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Near-exact equivalence of the normalized forms.
pub fn matches_exact(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Relaxed equivalence.
///
/// Holds when [`matches_exact`] holds, when either normalized form is a
/// prefix of the other, when `b` equals the short title of `a` verbatim, or
/// when the normalized short title of `a` starts with the normalized `b`.
/// The overlapping cases are checked in that order.
pub fn matches_relaxed(a: &str, b: &str) -> bool {
    let na = normalize(a);
    let nb = normalize(b);
    if na == nb {
        return true;
    }
    if na.starts_with(&nb) || nb.starts_with(&na) {
        return true;
    }
    let sa = short_title(a);
    if b == sa {
        return true;
    }
    normalize(&sa).starts_with(&nb)
}

/// Short-title equivalence, used when cross-checking a decision-outcome
/// statement against the considered-options list text.
pub fn matches_short_title(a: &str, b: &str) -> bool {
    matches_exact(a, b) || short_title(a).trim() == short_title(b).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ignores_whitespace_and_case() {
        assert!(matches_exact("Use MADR", "use madr"));
        assert!(matches_exact("Use  MADR ", "UseMADR"));
        assert!(!matches_exact("Use MADR", "Use ADR"));
    }

    #[test]
    fn test_relaxed_prefix_either_direction() {
        assert!(matches_relaxed("Use MADR 2.1.2", "Use MADR"));
        assert!(matches_relaxed("Use MADR", "Use MADR 2.1.2"));
        assert!(!matches_relaxed("Use MADR", "Keep ADRs"));
    }

    #[test]
    fn test_relaxed_short_title_equality() {
        assert!(matches_relaxed(
            "[MADR](https://adr.github.io/madr/) 2.1.2 \u{2013} The Markdown Architectural Decision Records",
            "MADR 2.1.2"
        ));
    }

    #[test]
    fn test_short_title_equivalence() {
        assert!(matches_short_title(
            "Include in [adr-tools](https://github.com/npryce/adr-tools)",
            "Include in adr-tools"
        ));
        assert!(!matches_short_title("Foo", "Baz"));
    }

    #[test]
    fn test_exact_match_implies_looser_matches() {
        let pairs = [
            ("Use MADR", "use madr"),
            ("FOO BAR", "foo bar"),
            ("A  B", "a b"),
            ("same", "same"),
        ];
        for (a, b) in pairs {
            assert!(matches_exact(a, b));
            assert!(matches_relaxed(a, b), "relaxed must subsume exact: {:?}", (a, b));
            assert!(matches_short_title(a, b), "short-title must subsume exact: {:?}", (a, b));
        }
    }
}
