//! Deterministic rendering of string lists and indented blocks

/// Prefix every line of `content` with `spaces` spaces.
///
/// Empty lines are prefixed too, so the output has as many lines as the input.
pub fn indent(spaces: usize, content: &str) -> String {
    let pad = " ".repeat(spaces);
    content
        .split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a list literal: `[]` when empty, otherwise one quoted item per line.
///
/// ```text
/// [
///     "a",
///     "b"
/// ]
/// ```
pub fn format_list<S: AsRef<str>>(items: &[S], spaces: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let lines = items
        .iter()
        .map(|item| format!("\"{}\"", item.as_ref()))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("[\n{}\n]", indent(spaces, &lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_inline() {
        let items: [&str; 0] = [];
        assert_eq!(format_list(&items, 4), "[]");
    }

    #[test]
    fn test_list_is_multiline() {
        assert_eq!(
            format_list(&["numpy", "yaml"], 4),
            "[\n    \"numpy\",\n    \"yaml\"\n]"
        );
    }

    #[test]
    fn test_list_items_are_not_escaped() {
        assert_eq!(format_list(&["a\"b"], 2), "[\n  \"a\"b\"\n]");
    }

    #[test]
    fn test_indent_every_line() {
        assert_eq!(indent(2, "a\n\nb"), "  a\n  \n  b");
        assert_eq!(indent(0, "a\nb"), "a\nb");
    }
}
