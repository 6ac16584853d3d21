/// Characters removed from user input: HTML-significant quotes and brackets,
/// plus delimiters that could break out of a remote filter expression.
pub const STRIPPED: [char; 10] = ['<', '>', '"', '\'', '`', ';', '{', '}', '(', ')'];

pub const MAX_QUERY_CHARS: usize = 100;

/// Strip the denylist, trim and cap at [`MAX_QUERY_CHARS`] characters.
pub fn sanitize(raw: &str) -> String {
    sanitize_with_limit(raw, MAX_QUERY_CHARS)
}

/// The cap counts chars, not bytes, so multi-byte input is never split.
///
/// Edge whitespace is trimmed after stripping, so `"( a"` becomes `"a"` and
/// sanitizing an already sanitized query returns it unchanged.
pub fn sanitize_with_limit(raw: &str, max_chars: usize) -> String {
    let stripped: String = raw.chars().filter(|c| !STRIPPED.contains(c)).collect();
    let capped: String = stripped.trim_start().chars().take(max_chars).collect();
    capped.trim_end().to_string()
}

pub fn tokenize(sanitized: &str) -> Vec<String> {
    sanitized
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_denied_character() {
        let out = sanitize(r#" <script>alert("x'`");{}</script> "#);
        for c in STRIPPED {
            assert!(!out.contains(c), "{c} survived in {out:?}");
        }
        assert_eq!(out, "scriptalertx/script");
    }

    #[test]
    fn caps_length_in_chars() {
        let long = "é".repeat(250);
        let out = sanitize(&long);
        assert_eq!(out.chars().count(), MAX_QUERY_CHARS);
        assert_eq!(sanitize_with_limit("abcdef", 3), "abc");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \t\n"), "");
        assert_eq!(sanitize(" ();{} "), "");
    }

    #[test]
    fn stripping_never_leaves_edge_whitespace() {
        assert_eq!(sanitize("( a"), "a");
        assert_eq!(sanitize("a ; b"), "a  b");
        assert_eq!(sanitize_with_limit("ab cd", 3), "ab");
    }

    #[test]
    fn tokenize_lowercases_and_drops_empty_runs() {
        assert_eq!(tokenize(&sanitize(" Foo   BAR ")), vec!["foo", "bar"]);
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("a\t\tB\nc"), vec!["a", "b", "c"]);
    }
}
