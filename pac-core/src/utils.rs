//! Shared casing and naming functions for code generation.

/// Characters that separate words in lexicon and definition names.
const WORD_SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Convert a string to PascalCase (e.g., "get_post" -> "GetPost").
///
/// Splits on `.`, `_` and `-`, uppercases the first letter of every segment
/// and keeps the remaining letters untouched, so already mixed-case input
/// ("alreadyPascal") collapses to the same result as its separated forms.
pub fn to_pascal_case(s: &str) -> String {
    s.split(WORD_SEPARATORS)
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// The entity base name of a lexicon id: its last dotted segment, lowercased.
///
/// `app.bsky.feed.post` -> `post`, `single` -> `single`.
pub fn entity_name(lexicon_id: &str) -> String {
    lexicon_id
        .rsplit('.')
        .next()
        .unwrap_or(lexicon_id)
        .to_lowercase()
}

/// Whether `s` can be used unquoted as a JavaScript property key.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
