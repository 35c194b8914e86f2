//! Text primitives the rule catalog is composed from.
//!
//! Every function here is total and idempotent: it accepts any string, never
//! fails, and running it on its own output changes nothing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `: %.1fx`, `：%.0fx`, ` : %d` and friends.
    static ref LABELED_FORMAT_REGEX: Regex =
        Regex::new(r"\s*[:：]\s*%[0-9]*\.?[0-9]*[df]x?").unwrap();
}

/// Characters that make up a trailing emphasis run.
const EMPHASIS: [char; 3] = ['!', '！', ' '];

fn is_emphasis(c: char) -> bool {
    EMPHASIS.contains(&c)
}

/// Removes the trailing run of `!`, `！` and spaces.
///
/// ```
/// use langfix::normalize::strip_trailing_emphasis;
/// assert_eq!(strip_trailing_emphasis("Guaranteed catch！ "), "Guaranteed catch");
/// assert_eq!(strip_trailing_emphasis("!!!"), "");
/// ```
pub fn strip_trailing_emphasis(s: &str) -> String {
    s.trim_end_matches(is_emphasis).to_string()
}

/// Removes the first match of `pattern`. No whitespace cleanup.
pub fn remove_match(s: &str, pattern: &Regex) -> String {
    pattern.replacen(s, 1, "").into_owned()
}

/// Removes every match of `pattern`, repeating until nothing matches.
///
/// Removing one match can splice its neighbours into a new one, so a single
/// `replace_all` pass is not enough to reach a fixed point.
pub fn remove_all_matches(s: &str, pattern: &Regex) -> String {
    let mut current = s.to_string();
    loop {
        let next = pattern.replace_all(&current, "");
        if next.len() == current.len() {
            return current;
        }
        current = next.into_owned();
    }
}

/// Removes every match of `pattern` but keeps its `lead` group, repeating
/// until nothing matches.
///
/// The `lead` group lets a pattern require a boundary before a token
/// without consuming it, e.g. `(?P<lead>^|[^0-9.])5x\s*` drops `5x` but
/// leaves `15x` alone.
///
/// ```
/// use langfix::normalize::remove_all_tokens;
/// use regex::Regex;
/// let re = Regex::new(r"(?P<lead>^|[^0-9.])5x\s*").unwrap();
/// assert_eq!(remove_all_tokens("Tour 1 (5x)", &re), "Tour 1 ()");
/// assert_eq!(remove_all_tokens("5x5x 15x", &re), "15x");
/// ```
pub fn remove_all_tokens(s: &str, pattern: &Regex) -> String {
    let mut current = s.to_string();
    loop {
        let next = pattern.replace_all(&current, "${lead}");
        if next.len() == current.len() {
            return current;
        }
        current = next.into_owned();
    }
}

/// Removes every `label: %.1fx`-style suffix (ASCII or full-width colon).
pub fn collapse_labeled_format(s: &str) -> String {
    remove_all_matches(s, &LABELED_FORMAT_REGEX)
}

/// Upper-cases the first character, leaving the rest as-is.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strips trailing emphasis, then surrounding whitespace.
///
/// Whitespace interleaved with the emphasis run (`"Go!\t!"`) is consumed in
/// the same pass so the result does not depend on how often this runs.
pub fn trim_after_strip(s: &str) -> String {
    s.trim_end_matches(|c: char| is_emphasis(c) || c.is_whitespace())
        .trim_start()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_emphasis_ascii() {
        assert_eq!(strip_trailing_emphasis("Guaranteed catch!"), "Guaranteed catch");
    }

    #[test]
    fn test_strip_trailing_emphasis_fullwidth_and_spaces() {
        assert_eq!(strip_trailing_emphasis("Guaranteed catch！ "), "Guaranteed catch");
        assert_eq!(strip_trailing_emphasis("必定捕获！！"), "必定捕获");
        assert_eq!(strip_trailing_emphasis("Go ! ！ !"), "Go");
    }

    #[test]
    fn test_strip_trailing_emphasis_noop() {
        assert_eq!(strip_trailing_emphasis("No excl here"), "No excl here");
        assert_eq!(strip_trailing_emphasis("Mid! sentence"), "Mid! sentence");
        assert_eq!(strip_trailing_emphasis(""), "");
        assert_eq!(strip_trailing_emphasis("! ！"), "");
    }

    #[test]
    fn test_strip_trailing_emphasis_keeps_leading_space() {
        assert_eq!(strip_trailing_emphasis("  hi!"), "  hi");
    }

    #[test]
    fn test_remove_match_first_only() {
        let re = Regex::new(r"5x\s*").unwrap();
        assert_eq!(remove_match("5x fast 5x", &re), "fast 5x");
        assert_eq!(remove_match("nothing", &re), "nothing");
    }

    #[test]
    fn test_remove_all_matches_reaches_fixed_point() {
        let re = Regex::new(r"ab").unwrap();
        assert_eq!(remove_all_matches("aabb", &re), "");
        assert_eq!(remove_all_matches("xaby", &re), "xy");
    }

    #[test]
    fn test_remove_all_tokens_keeps_lead() {
        let re = Regex::new(r"(?P<lead>^|[^0-9.])4x\s*").unwrap();
        assert_eq!(remove_all_tokens("4x fishing", &re), "fishing");
        assert_eq!(remove_all_tokens("fishing 4x bonus", &re), "fishing bonus");
        assert_eq!(remove_all_tokens("a 4x4x b", &re), "a b");
        assert_eq!(remove_all_tokens("14x and 0.4x", &re), "14x and 0.4x");
        assert_eq!(remove_all_tokens("", &re), "");
    }

    #[test]
    fn test_collapse_labeled_format() {
        assert_eq!(collapse_labeled_format("Turn info: %.1fx"), "Turn info");
        assert_eq!(collapse_labeled_format("Night phase：%.0fx"), "Night phase");
        assert_eq!(collapse_labeled_format("Count : %d"), "Count");
        assert_eq!(collapse_labeled_format("Nest ：  %.1f bonus"), "Nest bonus");
    }

    #[test]
    fn test_collapse_labeled_format_noop() {
        assert_eq!(collapse_labeled_format("Ratio %.1fx"), "Ratio %.1fx");
        assert_eq!(collapse_labeled_format("Label: value"), "Label: value");
        assert_eq!(collapse_labeled_format(""), "");
    }

    #[test]
    fn test_collapse_labeled_format_spliced_match() {
        // Removing the inner token leaves `: %` next to `d`.
        assert_eq!(collapse_labeled_format("a: %: %dxd"), "a");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("effective"), "Effective");
        assert_eq!(capitalize_first("Already"), "Already");
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first("1st"), "1st");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_trim_after_strip() {
        assert_eq!(trim_after_strip("  works great!  "), "works great");
        assert_eq!(trim_after_strip("Dive!\t!"), "Dive");
        assert_eq!(trim_after_strip("\n"), "");
    }

    #[test]
    fn test_primitives_idempotent() {
        let samples = [
            "",
            "Guaranteed catch! ！",
            "Turn info: %.1fx",
            "  lead and trail !\t",
            "a: %: %dxd",
            "ünïcödé！",
        ];
        for s in samples {
            let once = strip_trailing_emphasis(s);
            assert_eq!(strip_trailing_emphasis(&once), once);
            let once = collapse_labeled_format(s);
            assert_eq!(collapse_labeled_format(&once), once);
            let once = capitalize_first(s);
            assert_eq!(capitalize_first(&once), once);
            let once = trim_after_strip(s);
            assert_eq!(trim_after_strip(&once), once);
        }
    }
}
