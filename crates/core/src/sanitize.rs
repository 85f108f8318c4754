//! Title to filename sanitization.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]|\p{M}").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Longest stem in bytes, leaving room for a `_N` counter and an extension
/// within the usual 255 byte file name limit.
pub const MAX_STEM_BYTES: usize = 200;

/// Turns an article title into a string usable as a file stem.
///
/// - Applies Unicode NFKD normalization (so `ﬁ` becomes `fi`)
/// - Replaces combining marks and anything other than word characters,
///   whitespace and `-` with `_` (so `é` becomes `e_`)
/// - Replaces each run of whitespace with a single `_`
/// - Trims leading/trailing underscores
/// - Cuts the result to [`MAX_STEM_BYTES`] on a character boundary
///
/// The result may be empty, e.g. for a title made only of punctuation.
///
/// ```rust
/// use kindler_core::sanitize_title;
///
/// assert_eq!(sanitize_title("Hello, World!"), "Hello__World");
/// assert_eq!(sanitize_title("???"), "");
/// ```
pub fn sanitize_title(title: &str) -> String {
    let normalized: String = title.nfkd().collect();
    let replaced = UNSAFE_CHARS.replace_all(&normalized, "_");
    let joined = WHITESPACE_RUNS.replace_all(&replaced, "_");
    let trimmed = joined.trim_matches('_');

    let mut end = trimmed.len().min(MAX_STEM_BYTES);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].trim_end_matches('_').to_string()
}
