//! Small rendering helpers shared by the UI components.

/// ANSI escape sequence moving the cursor to a 1-based row/column.
#[must_use]
pub fn position_cursor(row: usize, col: usize) -> String {
    format!("\u{001b}[{row};{col}H")
}

/// Clips a string to `width` characters and pads it with spaces to exactly
/// that width. Widths are in characters, not bytes; Cyrillic cell content
/// would otherwise split mid-codepoint.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

/// Renders text with highlighted character ranges.
///
/// `ranges` are half-open `(start, end)` character ranges. `base_style` is
/// re-applied after each highlighted run.
#[must_use]
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    base_style: &str,
    highlight_style: &str,
) -> String {
    if ranges.is_empty() {
        return format!("{base_style}{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::from(base_style);
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }
        out.extend(&chars[pos..start]);
        out.push_str(highlight_style);
        out.extend(&chars[start..end]);
        out.push_str(base_style);
        pos = end;
    }
    out.extend(&chars[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_clips_and_pads_by_characters() {
        assert_eq!(fit("Йогурт", 4), "Йогу");
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn highlight_ranges_wrap_the_matched_runs() {
        let out = render_highlighted_text("abcdef", &[(1, 3)], "B", "H");
        assert_eq!(out, "BaHbcBdef");
    }

    #[test]
    fn out_of_bounds_ranges_are_clamped() {
        let out = render_highlighted_text("ab", &[(1, 9)], "B", "H");
        assert_eq!(out, "BaHbB");
    }
}
