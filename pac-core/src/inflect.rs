//! English singular/plural inflection for generated function names.
//!
//! The rules are ordered `(suffix, replacement)` tables; the first matching
//! rule wins. Irregular nouns are not handled.
//!
//! Singularizing only undoes the suffix rules, so a singular that itself
//! ends in `ie`, `se`, `che` or `xe` does not come back intact
//! (`movies` -> `movy`, `houses` -> `hous`). Pluralizing the result still
//! yields the original plural.

/// A single suffix rewrite.
struct Rule {
    /// Suffix the word must end with.
    suffix: &'static str,
    /// Replacement for the suffix.
    replacement: &'static str,
    /// Whether the character before the suffix must be a consonant.
    after_consonant: bool,
}

const fn rule(suffix: &'static str, replacement: &'static str) -> Rule {
    Rule {
        suffix,
        replacement,
        after_consonant: false,
    }
}

const fn consonant_rule(suffix: &'static str, replacement: &'static str) -> Rule {
    Rule {
        suffix,
        replacement,
        after_consonant: true,
    }
}

const PLURAL_RULES: &[Rule] = &[
    consonant_rule("y", "ies"),
    rule("ch", "ches"),
    rule("sh", "shes"),
    rule("s", "ses"),
    rule("x", "xes"),
    rule("z", "zes"),
    rule("", "s"),
];

const SINGULAR_RULES: &[Rule] = &[
    consonant_rule("ies", "y"),
    rule("ches", "ch"),
    rule("shes", "sh"),
    rule("ses", "s"),
    rule("xes", "x"),
    rule("zes", "z"),
    rule("s", ""),
];

impl Rule {
    fn apply(&self, word: &str) -> Option<String> {
        let stem = word.strip_suffix(self.suffix)?;
        if self.after_consonant && !stem.chars().last().is_some_and(is_consonant) {
            return None;
        }
        Some(format!("{}{}", stem, self.replacement))
    }
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn inflect(word: &str, rules: &[Rule]) -> String {
    if word.is_empty() {
        return String::new();
    }
    rules
        .iter()
        .find_map(|rule| rule.apply(word))
        .unwrap_or_else(|| word.to_string())
}

/// Pluralize an English noun (`story` -> `stories`, `box` -> `boxes`).
pub fn pluralize(word: &str) -> String {
    inflect(word, PLURAL_RULES)
}

/// Singularize an English noun (`stories` -> `story`, `boxes` -> `box`).
///
/// Words without a plural suffix are returned unchanged.
pub fn singularize(word: &str) -> String {
    inflect(word, SINGULAR_RULES)
}
