use owo_colors::OwoColorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FALLBACK_WIDTH: usize = 80;
const ELLIPSIS: char = '…';

pub fn log(text: impl AsRef<str>) {
    println!("{} {}", "[>>]".yellow().bold(), text.as_ref());
}

pub fn warn(text: impl AsRef<str>) {
    eprintln!("{} {}", "[!!]".magenta().bold(), text.as_ref());
}

pub fn error(text: impl AsRef<str>) {
    eprintln!("{} {}", "[!!]".white().on_red().bold(), text.as_ref());
}

/// Columns available for a dashboard line.
pub fn width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Cut `text` to at most `max` columns, ending with an ellipsis when cut.
pub fn fit(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Center `text` in `width` columns. Odd padding puts the extra space on the left.
pub fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    let left = padding.div_ceil(2);
    let right = padding - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_leaves_short_text_alone() {
        assert_eq!(fit("buy milk", 20), "buy milk");
        assert_eq!(fit("buy milk", 8), "buy milk");
    }

    #[test]
    fn fit_cuts_with_ellipsis() {
        assert_eq!(fit("buy milk", 5), "buy …");
        assert_eq!(fit("buy milk", 1), "…");
        assert_eq!(fit("buy milk", 0), "");
    }

    #[test]
    fn fit_counts_wide_characters() {
        // Each ideograph is two columns wide.
        assert_eq!(fit("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn center_biases_left() {
        assert_eq!(center("May 2026", 11), "  May 2026 ");
        assert_eq!(center("abc", 3), "abc");
        assert_eq!(center("too long", 4), "too long");
    }
}
