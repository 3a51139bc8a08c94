//! Doc-comment scraping.
//!
//! These are regex heuristics over raw `/** ... */` text, not a PHPDoc parser.
//! They understand the handful of tags the documentation needs: `@return`,
//! `@param` and the free-text summary.

use once_cell::sync::Lazy;
use regex::Regex;

static RETURN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@return\s+(\S+)\s").expect("valid @return regex"));

static ARRAY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)\[\]$").expect("valid array suffix regex"));

/// Comment delimiters, leading stars, tag lines and line breaks.
static DESCRIPTION_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/+\*\*|\*+/|\*|@\w+\b.*|\n").expect("valid description regex"));

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("valid space regex"));

/// Type named by the first `@return` tag.
pub fn return_tag(doc_comment: &str) -> Option<String> {
    RETURN_TAG
        .captures(doc_comment)
        .map(|caps| caps[1].to_string())
}

/// Type named by the `@param` tag of `$parameter`.
pub fn param_tag(doc_comment: &str, parameter: &str) -> Option<String> {
    let pattern = format!(r"@param\s+(\S+)\s+\${}\s", regex::escape(parameter));
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(doc_comment)
        .map(|caps| caps[1].to_string())
}

/// Looks for a `use Some\Namespace\<short_name>;` statement in file text and
/// returns the imported name.
pub fn find_import(source: &str, short_name: &str) -> Option<String> {
    let pattern = format!(r"use\s+(\S+\\{})\s*;", regex::escape(short_name));
    let regex = Regex::new(&pattern).ok()?;
    regex.captures(source).map(|caps| caps[1].to_string())
}

/// Splits `Foo[]` into `("Foo", true)`; anything else is returned unchanged.
pub fn split_array_suffix(type_name: &str) -> (&str, bool) {
    match ARRAY_SUFFIX.captures(type_name).and_then(|caps| caps.get(1)) {
        Some(element) => (element.as_str(), true),
        None => (type_name, false),
    }
}

/// Summary text of a doc comment with tags and comment syntax stripped.
pub fn description(doc_comment: &str) -> String {
    let stripped = DESCRIPTION_NOISE.replace_all(doc_comment, "");
    SPACE_RUNS.replace_all(&stripped, " ").trim().to_string()
}
