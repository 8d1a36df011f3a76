use regex::Regex;
use std::sync::OnceLock;

static STRIP: OnceLock<Regex> = OnceLock::new();
static COLLAPSE: OnceLock<Regex> = OnceLock::new();

/// Normalizes a product title into a URL-safe slug: strips everything but
/// alphanumerics, whitespace, and hyphens, hyphenates spaces, collapses
/// hyphen runs, lowercases, and trims leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let strip = STRIP.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s-]").unwrap());
    let collapse = COLLAPSE.get_or_init(|| Regex::new(r"-{2,}").unwrap());

    let stripped = strip.replace_all(title, "");
    let hyphenated = stripped.replace(' ', "-");
    let collapsed = collapse.replace_all(&hyphenated, "-");
    collapsed.to_lowercase().trim_matches('-').to_string()
}
