//! Report formatting utilities for terminal output

use crate::models::BudgetStatus;

/// Format an amount with two decimals and a trailing currency symbol
pub fn format_amount(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{:.2} {}", amount.abs(), symbol)
    } else {
        format!("{:.2} {}", amount, symbol)
    }
}

/// Format an optional chart value, blank when absent
pub fn format_optional(value: Option<f64>, symbol: &str) -> String {
    value.map(|v| format_amount(v, symbol)).unwrap_or_default()
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation, capped at `width`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Status label with color hints for terminal display
pub fn format_status(status: BudgetStatus) -> String {
    match status {
        BudgetStatus::Safe => format!("\x1b[32m{}\x1b[0m", status),
        BudgetStatus::Warning => format!("\x1b[33m{}\x1b[0m", status),
        BudgetStatus::Over => format!("\x1b[31m{}\x1b[0m", status),
    }
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let padding = if title.len() >= width {
        0
    } else {
        (width - title.len()) / 2
    };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
