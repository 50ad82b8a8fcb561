//! URL slugs derived from event titles.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lower-case `title`, collapse every run of characters outside `[a-z0-9]`
/// into one `-`, and trim leading and trailing dashes.
///
/// Non-ASCII letters are treated as separators. The result is empty when the
/// title has no ASCII letter or digit.
///
/// ```
/// use domain_events::slug::generate_slug;
///
/// assert_eq!(generate_slug("Unite Summit 2026!"), "unite-summit-2026");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
