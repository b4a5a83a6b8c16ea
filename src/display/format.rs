//! Shared formatting helpers for terminal output

/// Format a percentage with one decimal place
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// A fixed-width progress bar for a 0-100 percentage
///
/// Values above 100 render as a full bar.
pub fn format_bar(pct: f64, width: usize) -> String {
    if pct <= 0.0 || !pct.is_finite() {
        return "░".repeat(width);
    }

    let filled = ((pct.min(100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with an ellipsis
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
        assert_eq!(format_percentage(60.0), "60.0%");
        assert_eq!(format_percentage(120.0), "120.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);

        assert_eq!(format_bar(150.0, 4), "████");
        assert_eq!(format_bar(0.0, 4), "░░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }
}
