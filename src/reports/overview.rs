//! Finance Overview
//!
//! Everything shown for a single month: daily activity, totals, budget
//! status per category, spending spikes against the prior month and the
//! forecast that follows.

use serde::Serialize;
use tracing::{debug, warn};

use super::forecast::{ForecastReport, ForecastRequest};
use crate::config::Settings;
use crate::display::{
    anomaly_table, bucket_table, budget_table, double_separator, format_amount, format_header,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{AnomalySignal, Bucket, BucketMode, PeriodKey, SeriesField, Window};
use crate::services::{
    detect_between, BucketService, BudgetAnalyzer, CategoryBudget, CategoryResolver,
};
use crate::source::Snapshot;

/// Month overview
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceOverview {
    pub period: PeriodKey,
    pub days: Vec<Bucket>,
    pub month: Bucket,
    pub prior_month: Bucket,
    pub budgets: Vec<CategoryBudget>,
    pub anomalies: Vec<AnomalySignal>,
    pub forecast: ForecastReport,
    #[serde(skip)]
    currency_symbol: String,
}

impl FinanceOverview {
    /// Generate the overview for `year`/`month`
    pub fn generate(
        snapshot: &Snapshot,
        settings: &Settings,
        year: i32,
        month: u32,
    ) -> TallyResult<Self> {
        let period = PeriodKey::month(year, month);
        let window = Window::month(year, month)?;
        let prior = period
            .prev()
            .ok_or_else(|| TallyError::Validation(format!("{} has no prior month", period)))?;
        let prior_window = Window::period(prior)?;

        let undated = snapshot.undated_count();
        if undated > 0 {
            warn!(undated, "transactions without a date are left out of every bucket");
        }

        let resolver = CategoryResolver::new(&snapshot.categories);
        let bucketer = BucketService::new(&resolver);

        let days = bucketer.bucket(&snapshot.transactions, BucketMode::Day, &window);
        let month_bucket = bucketer.total(&snapshot.transactions, BucketMode::Month, &window);
        let prior_bucket = bucketer.total(&snapshot.transactions, BucketMode::Month, &prior_window);

        let budgets = BudgetAnalyzer::new(settings.budget).analyze_bucket(&month_bucket, &resolver);
        let anomalies =
            detect_between(&month_bucket, &prior_bucket, settings.anomaly_threshold_percent);

        let request = ForecastRequest {
            until: (year, month),
            history_months: settings.forecast.history_months,
            horizon: settings.forecast.horizon,
            algorithm: settings.forecast.algorithm,
            field: SeriesField::Expense,
        };
        let forecast = ForecastReport::generate(snapshot, settings, &request)?;

        debug!(
            %period,
            budgets = budgets.len(),
            anomalies = anomalies.len(),
            "overview generated"
        );

        Ok(Self {
            period,
            days,
            month: month_bucket,
            prior_month: prior_bucket,
            budgets,
            anomalies,
            forecast,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    /// Days of the month with any activity
    pub fn active_days(&self) -> impl Iterator<Item = &Bucket> {
        self.days.iter().filter(|b| !b.is_empty())
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self) -> String {
        let symbol = &self.currency_symbol;
        let mut output = String::new();

        output.push_str(&format_header(&format!("Overview {}", self.period), 60));
        output.push('\n');
        output.push_str(&double_separator(60));
        output.push_str("\n\n");

        output.push_str(&format!(
            "Expenses: {:>14}   (prior month {})\n",
            format_amount(self.month.total_expense, symbol),
            format_amount(self.prior_month.total_expense, symbol)
        ));
        output.push_str(&format!(
            "Revenues: {:>14}   (prior month {})\n",
            format_amount(self.month.total_revenue, symbol),
            format_amount(self.prior_month.total_revenue, symbol)
        ));
        output.push_str(&format!(
            "Balance:  {:>14}\n",
            format_amount(self.month.balance(), symbol)
        ));
        output.push_str(&format!("Transactions: {}\n\n", self.month.count));

        let active: Vec<Bucket> = self.active_days().cloned().collect();
        if !active.is_empty() {
            output.push_str("Daily activity\n");
            output.push_str(&bucket_table(&active, symbol));
            output.push_str("\n\n");
        }

        output.push_str("Budgets\n");
        if self.budgets.is_empty() {
            output.push_str("No category budgets set.\n\n");
        } else {
            output.push_str(&budget_table(&self.budgets, symbol));
            output.push_str("\n\n");
        }

        output.push_str("Anomalies\n");
        if self.anomalies.is_empty() {
            output.push_str("No unusual spending increases.\n\n");
        } else {
            output.push_str(&anomaly_table(&self.anomalies));
            output.push_str("\n\n");
        }

        output.push_str(&self.forecast.format_terminal());

        output
    }
}
