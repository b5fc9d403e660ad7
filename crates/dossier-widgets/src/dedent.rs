//! Removal of the indentation that descriptions pick up when they are
//! written inside source code.
//!
//! ```
//! use dossier_widgets::dedent::remove_leading_spaces;
//!
//! assert_eq!(remove_leading_spaces("\n    line one\n    line two\n"), "\nline one\nline two\n");
//! assert_eq!(remove_leading_spaces("  a\n    b"), "a\n  b");
//! assert_eq!(remove_leading_spaces("no indent"), "no indent");
//! ```

use std::borrow::Cow;

/// Strip the leading run of spaces shared by every line.
///
/// The prefix length comes from the first line (or the second, when the
/// text opens with a newline). If any line has non-blank characters inside
/// that prefix the input is returned untouched.
#[must_use]
pub fn remove_leading_spaces(input: &str) -> Cow<'_, str> {
    let Some(prefix_len) = prefix_len(input) else {
        return Cow::Borrowed(input);
    };

    let uniform = input
        .split('\n')
        .all(|line| line.chars().take(prefix_len).all(is_blank));
    if !uniform {
        return Cow::Borrowed(input);
    }

    let lines: Vec<&str> = input
        .split('\n')
        .map(|line| skip_chars(line, prefix_len))
        .collect();
    Cow::Owned(lines.join("\n"))
}

/// Length of the space run at the start of the text, after an optional
/// leading newline. Only U+0020 counts.
fn prefix_len(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('\n').unwrap_or(input);
    let len = rest.chars().take_while(|&c| c == ' ').count();
    (len > 0).then_some(len)
}

/// Unicode whitespace plus U+FEFF, minus U+0085 (NEL), which is not blank.
fn is_blank(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn skip_chars(line: &str, count: usize) -> &str {
    line.char_indices()
        .nth(count)
        .and_then(|(i, _)| line.get(i..))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leading_newline_then_indent() {
        assert_eq!(
            remove_leading_spaces("\n    line one\n    line two\n"),
            "\nline one\nline two\n"
        );
    }

    #[test]
    fn test_prefix_from_first_line() {
        assert_eq!(remove_leading_spaces("  a\n    b"), "a\n  b");
    }

    #[test]
    fn test_no_indent_borrows() {
        let out = remove_leading_spaces("hello\n  world");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "hello\n  world");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(remove_leading_spaces(""), "");
        assert_eq!(remove_leading_spaces("\n"), "\n");
    }

    #[test]
    fn test_content_inside_prefix_keeps_input() {
        let input = "    a\n  b";
        let out = remove_leading_spaces(input);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn test_short_lines_become_empty() {
        assert_eq!(remove_leading_spaces("    a\n\n  \n    b"), "a\n\n\nb");
    }

    #[test]
    fn test_tab_does_not_start_prefix() {
        assert_eq!(remove_leading_spaces("\tindented\n\tmore"), "\tindented\n\tmore");
    }

    #[test]
    fn test_tab_inside_prefix_counts_as_blank() {
        assert_eq!(remove_leading_spaces("  a\n\t\tb"), "a\nb");
    }

    #[test]
    fn test_newline_then_text_is_unchanged() {
        assert_eq!(remove_leading_spaces("\nfoo\n  bar"), "\nfoo\n  bar");
    }

    #[test]
    fn test_two_leading_newlines_is_unchanged() {
        assert_eq!(remove_leading_spaces("\n\n  a\n  b"), "\n\n  a\n  b");
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(remove_leading_spaces("  a\r\n  b"), "a\r\nb");
    }

    #[test]
    fn test_multibyte_content_is_char_counted() {
        assert_eq!(remove_leading_spaces("  héllo\n  wörld"), "héllo\nwörld");
        assert_eq!(remove_leading_spaces("  日本\n   語"), "日本\n 語");
    }

    #[test]
    fn test_multibyte_inside_prefix_keeps_input() {
        assert_eq!(remove_leading_spaces("   x\né"), "   x\né");
    }

    #[test]
    fn test_bom_counts_as_blank() {
        assert_eq!(remove_leading_spaces("  a\n\u{feff} b"), "a\nb");
    }

    #[test]
    fn test_next_line_is_not_blank() {
        let input = "  a\n\u{85} b";
        let out = remove_leading_spaces(input);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn test_only_spaces() {
        assert_eq!(remove_leading_spaces("    "), "");
    }

    #[test]
    fn test_not_idempotent_for_non_uniform_indent() {
        let once = remove_leading_spaces("  \n    x").into_owned();
        assert_eq!(once, "\n  x");
        assert_eq!(remove_leading_spaces(&once), "\nx");
    }

    fn content_line() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9#*`][a-zA-Z0-9 #*`.,]{0,20}"
    }

    proptest! {
        #[test]
        fn prop_unindented_text_unchanged(s in "[a-zA-Z0-9#*][a-zA-Z0-9 \n\t]{0,60}") {
            prop_assert_eq!(remove_leading_spaces(&s), s.as_str());
        }

        #[test]
        fn prop_uniform_prefix_removed(
            k in 1usize..8,
            lines in prop::collection::vec(content_line(), 1..8),
        ) {
            let prefix = " ".repeat(k);
            let input = lines
                .iter()
                .map(|l| format!("{prefix}{l}"))
                .collect::<Vec<_>>()
                .join("\n");
            prop_assert_eq!(remove_leading_spaces(&input), lines.join("\n"));
        }

        #[test]
        fn prop_idempotent_on_uniform_text(
            k in 1usize..8,
            lines in prop::collection::vec(content_line(), 1..8),
            leading_newline in any::<bool>(),
        ) {
            let prefix = " ".repeat(k);
            let mut input = lines
                .iter()
                .map(|l| format!("{prefix}{l}"))
                .collect::<Vec<_>>()
                .join("\n");
            if leading_newline {
                input.insert(0, '\n');
            }
            let once = remove_leading_spaces(&input).into_owned();
            let twice = remove_leading_spaces(&once);
            prop_assert_eq!(twice, once.as_str());
        }

        #[test]
        fn prop_content_inside_prefix_keeps_input(
            k in 2usize..8,
            first in content_line(),
            second in content_line(),
        ) {
            let input = format!("{}{first}\n{second}", " ".repeat(k));
            prop_assert_eq!(remove_leading_spaces(&input), input.as_str());
        }

        #[test]
        fn prop_never_panics_and_never_grows(s in "\\PC*") {
            let out = remove_leading_spaces(&s);
            prop_assert!(out.len() <= s.len());
        }
    }
}
