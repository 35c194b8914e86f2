//! The per-key rule catalog and the dispatcher that runs it over a table.
//!
//! A rule is a plain function pointer bound to one full message key. The
//! catalog is an ordered list of such bindings; [`RuleCatalog::apply`] runs
//! them over a [`LocaleTable`] and reports what changed.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    normalize::{
        capitalize_first, collapse_labeled_format, remove_all_matches, remove_all_tokens,
        strip_trailing_emphasis, trim_after_strip,
    },
    types::{ChangeRecord, FixOutcome, LocaleTable},
};

/// Namespace shared by every key of the catch-rate catalog.
pub const CATCHRATE_PREFIX: &str = "catchrate.ball.";

/// A pure rewrite of one message value.
pub type Transform = fn(&str) -> String;

lazy_static! {
    static ref ANCIENT_ANNOTATION_REGEX: Regex = Regex::new(r"\s*\(1x[^)]*\)").unwrap();
    static ref FIRST_COLON_REGEX: Regex = Regex::new(r":\s*").unwrap();
    // Multiplier tokens. `lead` is the character before the token and is
    // kept, so `15x` or `10.1x` never lose their tail.
    static ref QUICK_TOKEN_REGEX: Regex = Regex::new(r"(?P<lead>^|[^0-9.])5x\s*").unwrap();
    static ref BEAST_TOKEN_REGEX: Regex = Regex::new(r"(?P<lead>^|[^0-9.])0\.1x\s*").unwrap();
    static ref LURE_TOKEN_REGEX: Regex = Regex::new(r"(?P<lead>^|[^0-9.])4x\s*").unwrap();
    static ref REPEAT_TOKEN_REGEX: Regex =
        Regex::new(r"(?P<lead>^|[^0-9.])3\.5x\s*[-–—]\s*").unwrap();
    static ref BARE_FORMAT_REGEX: Regex = Regex::new(r"%[0-9]*\.?[0-9]*[df]x?\s*").unwrap();
}

/// Suffix → transform table of the catch-rate display strings, in the
/// order the rules run.
const CATCHRATE_RULES: &[(&str, Transform)] = &[
    ("guaranteed_catch", strip_trailing_emphasis),
    ("multiplier_always", clear),
    ("ancient", ancient),
    ("quick.effective", quick_effective),
    ("quick.ineffective", trim_after_strip),
    ("timer.turn_info", collapse_labeled_format),
    ("dive.underwater", strip_trailing_emphasis),
    ("dive.need_underwater", trim_after_strip),
    ("moon.night_phase", collapse_labeled_format),
    ("net.effective", strip_trailing_emphasis),
    ("nest.effective", collapse_labeled_format),
    ("nest.ineffective", trim_after_strip),
    ("fast.effective", strip_trailing_emphasis),
    ("beast.ultra_beast", strip_trailing_emphasis),
    ("beast.penalty", beast_penalty),
    ("dream.sleeping", strip_trailing_emphasis),
    ("dream.need_sleep", trim_after_strip),
    ("level.effective", level_effective),
    ("repeat.effective", repeat_effective),
    ("lure.effective", lure_effective),
];

/// The ball line already shows the multiplier.
fn clear(_: &str) -> String {
    String::new()
}

/// `Ancient ball: heavier (1x base)` → `Ancient ball (heavier)`.
///
/// Only the first colon is rewritten and the closing paren is appended
/// when the value does not already end with one.
fn ancient(value: &str) -> String {
    let value = remove_all_matches(value, &ANCIENT_ANNOTATION_REGEX);
    let value = FIRST_COLON_REGEX.replacen(&value, 1, " (").into_owned();
    if value.contains('(') && !value.ends_with(')') {
        format!("{})", value.trim_end())
    } else {
        value
    }
}

/// Drop every multiplier token, tidy the ends, capitalize what is left.
fn drop_multiplier(value: &str, token: &Regex) -> String {
    capitalize_first(&trim_after_strip(&remove_all_tokens(value, token)))
}

fn quick_effective(value: &str) -> String {
    drop_multiplier(value, &QUICK_TOKEN_REGEX)
}

fn beast_penalty(value: &str) -> String {
    drop_multiplier(value, &BEAST_TOKEN_REGEX)
}

fn repeat_effective(value: &str) -> String {
    drop_multiplier(value, &REPEAT_TOKEN_REGEX)
}

fn lure_effective(value: &str) -> String {
    drop_multiplier(value, &LURE_TOKEN_REGEX)
}

fn level_effective(value: &str) -> String {
    capitalize_first(&trim_after_strip(&remove_all_matches(
        value,
        &BARE_FORMAT_REGEX,
    )))
}

/// One key bound to one transform.
#[derive(Debug, Clone)]
pub struct Rule {
    pub key: String,
    pub transform: Transform,
}

impl Rule {
    pub fn new(key: impl Into<String>, transform: Transform) -> Self {
        Rule {
            key: key.into(),
            transform,
        }
    }

    pub fn apply(&self, value: &str) -> String {
        (self.transform)(value)
    }
}

/// Ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catch-rate display catalog under `catchrate.ball.`.
    pub fn catchrate() -> Self {
        Self::with_prefix(CATCHRATE_PREFIX)
    }

    /// The catch-rate display rules bound under another namespace.
    ///
    /// `prefix` is prepended verbatim, so it normally ends with a dot.
    pub fn with_prefix(prefix: &str) -> Self {
        CATCHRATE_RULES
            .iter()
            .fold(Self::new(), |catalog, (suffix, transform)| {
                catalog.with_rule(format!("{prefix}{suffix}"), *transform)
            })
    }

    /// Appends a rule. Rules run in insertion order.
    pub fn with_rule(mut self, key: impl Into<String>, transform: Transform) -> Self {
        self.rules.push(Rule::new(key, transform));
        self
    }

    /// First rule bound to `key`.
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule whose key is present in `table`.
    ///
    /// The returned table has the input's keys in the input's order; keys
    /// without a rule are copied as-is. A change is recorded for every key
    /// whose final value differs from the original, in catalog order. Keys
    /// bound more than once are rewritten by each of their rules in turn
    /// and reported once.
    pub fn apply(&self, table: &LocaleTable) -> FixOutcome {
        let mut fixed = table.clone();
        for rule in &self.rules {
            if let Some(entry) = fixed.find_entry_mut(&rule.key) {
                entry.value = rule.apply(&entry.value);
            }
        }

        let mut seen = HashSet::new();
        let mut changes = Vec::new();
        for key in self.keys() {
            if !seen.insert(key) {
                continue;
            }
            let (Some(before), Some(after)) = (table.get(key), fixed.get(key)) else {
                continue;
            };
            if before != after {
                debug!(locale = %table.locale, key, before, after, "rewrote value");
                changes.push(ChangeRecord {
                    key: key.to_string(),
                    before: before.to_string(),
                    after: after.to_string(),
                });
            }
        }

        FixOutcome {
            table: fixed,
            changes,
        }
    }
}
