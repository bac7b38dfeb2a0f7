//! Table rendering for engine outputs

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_amount, format_bar, format_optional, format_percentage, format_status};
use crate::models::{AnomalySignal, Bucket, ForecastPoint, SeriesPoint};
use crate::services::CategoryBudget;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Expenses")]
    expense: String,
    #[tabled(rename = "Revenues")]
    revenue: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Avg Expense")]
    average: String,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct AnomalyRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Increase")]
    increase: String,
}

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Predicted Expenses")]
    expense: String,
    #[tabled(rename = "Predicted Revenues")]
    revenue: String,
    #[tabled(rename = "Predicted Balance")]
    balance: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render buckets as a table
pub fn bucket_table(buckets: &[Bucket], symbol: &str) -> String {
    render(
        buckets
            .iter()
            .map(|b| BucketRow {
                period: b.period_key.to_string(),
                expense: format_amount(b.total_expense, symbol),
                revenue: format_amount(b.total_revenue, symbol),
                count: b.count,
                average: format_amount(b.average_expense, symbol),
            })
            .collect(),
    )
}

/// Render budget statuses as a table
pub fn budget_table(budgets: &[CategoryBudget], symbol: &str) -> String {
    render(
        budgets
            .iter()
            .map(|b| BudgetRow {
                category: b.category.clone(),
                spent: format_amount(b.spent, symbol),
                limit: format_amount(b.limit, symbol),
                used: format_percentage(b.ratio * 100.0),
                bar: format_bar(b.spent, b.limit, 10),
                status: format_status(b.status),
            })
            .collect(),
    )
}

/// Render anomaly signals as a table
pub fn anomaly_table(signals: &[AnomalySignal]) -> String {
    render(
        signals
            .iter()
            .map(|s| AnomalyRow {
                category: s.category.clone(),
                period: s.period_key.to_string(),
                increase: format!("+{}", format_percentage(s.percent_increase)),
            })
            .collect(),
    )
}

/// Render forecast points as a table
pub fn forecast_table(points: &[ForecastPoint], symbol: &str) -> String {
    render(
        points
            .iter()
            .map(|p| ForecastRow {
                period: p.period_key.to_string(),
                expense: format_amount(p.predicted_expense, symbol),
                revenue: format_amount(p.predicted_revenue, symbol),
                balance: format_amount(p.predicted_balance(), symbol),
            })
            .collect(),
    )
}

/// Render a projected series as a table
pub fn series_table(series: &[SeriesPoint], symbol: &str) -> String {
    render(
        series
            .iter()
            .map(|p| SeriesRow {
                label: p.label.clone(),
                actual: format_optional(p.actual, symbol),
                predicted: format_optional(p.predicted, symbol),
            })
            .collect(),
    )
}
