//! Case-insensitive keyword matching against response bodies.

/// True if at least one keyword occurs in `body`, ignoring case.
///
/// An empty keyword list never matches. Empty keywords are skipped rather
/// than matching every body; other keywords are used exactly as given.
pub fn matches<S: AsRef<str>>(body: &str, keywords: &[S]) -> bool {
    if keywords.is_empty() {
        return false;
    }
    let haystack = body.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.is_empty())
        .any(|k| haystack.contains(&k.to_lowercase()))
}

/// Split a comma-separated keyword list, trimming items and dropping empty ones.
pub fn parse_keyword_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
