//! Report formatting utilities for terminal output

/// Format a percentage with precision that depends on its size
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar of `width` cells filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Section title followed by an underline of the same width
pub fn section_title(title: &str) -> String {
    format!("{}\n{}\n", title, separator(title.chars().count()))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to at most `max_len` characters, ending in "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(27.6), "28%");
        assert_eq!(format_percentage(-9.0), "-9.0%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);

        assert_eq!(format_bar(0.0, 100.0, 4), "░░░░");
        assert_eq!(format_bar(200.0, 100.0, 4), "████");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }

    #[test]
    fn test_section_title() {
        assert_eq!(section_title("Trend"), "Trend\n─────\n");
    }
}
