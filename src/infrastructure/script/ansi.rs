use regex::Regex;
use std::sync::LazyLock;

/// ESC `[`, parameter bytes, intermediate bytes, one final byte.
static CSI_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]").expect("CSI pattern is valid"));

/// Removes terminal CSI escape sequences (colors, cursor movement) from `text`.
///
/// Repeats until nothing matches, so sequences that only form once an inner
/// one is removed are stripped too and `strip(strip(x)) == strip(x)`.
pub fn strip(text: &str) -> String {
    let mut current = text.to_string();
    while CSI_SEQUENCE.is_match(&current) {
        current = CSI_SEQUENCE.replace_all(&current, "").into_owned();
    }
    current
}
