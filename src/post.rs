use regex::Regex;
use std::sync::OnceLock;

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Non-greedy, single-line: `.` does not cross a line break, so an
    // unpaired underscore at the end of one line never swallows the next.
    RE.get_or_init(|| Regex::new(r"_(.*?)_").expect("emphasis regex"))
}

/// Convert `_underscore_` emphasis spans into inline `<em>` tags for display.
/// Line-break structure passes through untouched; the display layer renders
/// the text as-is.
///
/// Re-running on already-converted text is a no-op as long as no underscore
/// pairs remain. A literal underscore pair the model meant as plain text is
/// indistinguishable from emphasis and gets converted too.
pub fn normalize_markup(raw: &str) -> String {
    emphasis_re().replace_all(raw, "<em>$1</em>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_emphasis_spans() {
        assert_eq!(normalize_markup("a _b_ c"), "a <em>b</em> c");
        assert_eq!(
            normalize_markup("_one_ and _two_"),
            "<em>one</em> and <em>two</em>"
        );
    }

    #[test]
    fn second_pass_is_a_noop_once_no_pairs_remain() {
        let once = normalize_markup("a _b_ c");
        assert_eq!(normalize_markup(&once), once);
    }

    #[test]
    fn pairs_do_not_span_line_breaks() {
        let text = "ends with _\nstarts with _";
        assert_eq!(normalize_markup(text), text);
    }

    #[test]
    fn paragraph_breaks_are_preserved() {
        let text = "first stanza line\nsecond line\n\nnext _stanza_ opens";
        assert_eq!(
            normalize_markup(text),
            "first stanza line\nsecond line\n\nnext <em>stanza</em> opens"
        );
    }

    #[test]
    fn lone_underscore_is_left_alone() {
        assert_eq!(normalize_markup("snake_case"), "snake_case");
        // two underscores on one line still count as a pair
        assert_eq!(normalize_markup("a_b_c"), "a<em>b</em>c");
    }
}
