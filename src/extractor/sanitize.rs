/// Drop characters that are unsafe to display or store.
///
/// Line breaks and tabs become a single space, other control characters,
/// byte order marks and replacement characters left by lossy decoding are
/// removed.
pub fn strip_illegal_chars(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            '\u{feff}' | '\u{fffd}' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Remove every occurrence of each noise substring, in order.
pub fn strip_noise(text: &str, noise: &[String]) -> String {
    noise
        .iter()
        .filter(|n| !n.is_empty())
        .fold(text.to_string(), |acc, n| acc.replace(n.as_str(), ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_control_and_replacement_chars() {
        assert_eq!(strip_illegal_chars("a\u{0}b\u{7}c\u{fffd}"), "abc");
        assert_eq!(strip_illegal_chars("\u{feff}标题"), "标题");
    }

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(strip_illegal_chars("one\ntwo\tthree"), "one two three");
    }

    #[test]
    fn noise_is_removed_everywhere() {
        let noise = vec!["  日经中文网".to_string(), String::new()];
        assert_eq!(strip_noise("标题  日经中文网", &noise), "标题");
        assert_eq!(strip_noise("plain", &noise), "plain");
    }
}
