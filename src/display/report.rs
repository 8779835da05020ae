//! Report formatting utilities for terminal output

use chrono::NaiveDate;

use crate::models::Money;

/// Format an amount with the configured currency symbol
pub fn format_money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Format a date with a strftime pattern
///
/// An empty pattern falls back to ISO `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    if pattern.is_empty() {
        date.to_string()
    } else {
        date.format(pattern).to_string()
    }
}

/// Format a percentage with two decimals
pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to at most `max_len` characters, ending in an ellipsis if cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(66.666), "66.67%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_format_money_and_date() {
        assert_eq!(format_money(Money::from_cents(-1050), "€"), "-€10.50");
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y"), "07/03/2025");
        assert_eq!(format_date(date, ""), "2025-03-07");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(150.0, 100.0, 4), "████");
        assert_eq!(format_bar(0.0, 100.0, 3), "   ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }
}
