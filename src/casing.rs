//! Identifier casing helpers.
//!
//! Converts PascalCase and camelCase class names into kebab-case slugs used
//! for documentation file names and anchors.

/// Converts an identifier to a kebab-case slug.
///
/// A separator is inserted at every lower→upper boundary, and before the last
/// letter of an acronym that opens a word and runs into a lowercase letter
/// (`XMLHttpRequest` → `xml-http-request`). Existing hyphens are kept and never
/// doubled.
pub fn to_kebab_case(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut slug = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();

            let lower_to_upper = prev.is_lowercase();
            let acronym_to_word = prev.is_uppercase()
                && next.is_some_and(char::is_lowercase)
                && acronym_opens_word(&chars, i - 1);

            if (lower_to_upper || acronym_to_word) && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.extend(c.to_lowercase());
    }

    slug
}

/// Returns true if the uppercase run ending at `end` starts the identifier or
/// follows a non-alphanumeric character.
fn acronym_opens_word(chars: &[char], end: usize) -> bool {
    let mut start = end;
    while start > 0 && chars[start - 1].is_uppercase() {
        start -= 1;
    }
    start == 0 || !chars[start - 1].is_alphanumeric()
}
