//! Clip name sanitization.
//!
//! Word characters are ASCII letters, digits and underscore. Anything else is a
//! symbol: symbols and underscores are chopped from both ends, inner symbol runs
//! become a single underscore, and repeated underscores are collapsed.

use regex::Regex;

lazy_static! {
    static ref REGEX_EDGES: Regex = Regex::new(r"^[^A-Za-z0-9]+|[^A-Za-z0-9]+$").unwrap();
    static ref REGEX_SYMBOLS: Regex = Regex::new(r"[^A-Za-z0-9_]+").unwrap();
    static ref REGEX_UNDERSCORES: Regex = Regex::new(r"_{2,}").unwrap();
}

/// Returns a string that is appropriate for filename usage.
///
/// The result only contains `[A-Za-z0-9_]`, never starts or ends with an
/// underscore and never contains two underscores in a row. A name made only of
/// symbols comes back empty.
pub fn sanitize(text: &str) -> String {
    let chopped = REGEX_EDGES.replace_all(text, "");
    let sanitized = REGEX_SYMBOLS.replace_all(&chopped, "_");
    let tidy = REGEX_UNDERSCORES.replace_all(&sanitized, "_");
    tidy.into_owned()
}

pub fn is_clean(text: &str) -> bool {
    sanitize(text) == text
}
