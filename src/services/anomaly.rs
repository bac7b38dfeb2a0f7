//! Spending anomaly detection
//!
//! Flags categories whose spend grew faster than a relative threshold from
//! one period to the next. Growth from zero cannot be measured, so
//! categories without prior spend are never flagged.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{AnomalySignal, Bucket, PeriodKey};

/// Default alert threshold, in percent
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 50.0;

/// Compare per-category spend between two periods
///
/// Emits a signal for every category present in `current` whose prior spend
/// is positive and whose increase is strictly above `threshold_percent`.
/// Signals come out in category name order.
pub fn detect(
    current: &BTreeMap<String, f64>,
    prior: &BTreeMap<String, f64>,
    period_key: PeriodKey,
    threshold_percent: f64,
) -> Vec<AnomalySignal> {
    let signals: Vec<AnomalySignal> = current
        .iter()
        .filter_map(|(category, &now)| {
            let before = prior.get(category).copied().unwrap_or(0.0);
            if before <= 0.0 {
                return None;
            }

            let percent_increase = (now - before) / before * 100.0;
            (percent_increase > threshold_percent).then(|| AnomalySignal {
                category: category.clone(),
                period_key,
                percent_increase,
            })
        })
        .collect();

    debug!(
        period = %period_key,
        categories = current.len(),
        flagged = signals.len(),
        threshold_percent,
        "anomaly scan"
    );

    signals
}

/// Compare two buckets' category spend; signals carry the current bucket's key
pub fn detect_between(
    current: &Bucket,
    prior: &Bucket,
    threshold_percent: f64,
) -> Vec<AnomalySignal> {
    detect(
        &current.by_category,
        &prior.by_category,
        current.period_key,
        threshold_percent,
    )
}

/// Scan consecutive buckets of a history, each against the one before it
pub fn detect_series(history: &[Bucket], threshold_percent: f64) -> Vec<AnomalySignal> {
    history
        .windows(2)
        .flat_map(|pair| detect_between(&pair[1], &pair[0], threshold_percent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spend(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_sixty_percent_is_flagged() {
        let signals = detect(
            &spend(&[("Dining", 160.0)]),
            &spend(&[("Dining", 100.0)]),
            PeriodKey::month(2025, 2),
            DEFAULT_THRESHOLD_PERCENT,
        );

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].category, "Dining");
        assert!((signals[0].percent_increase - 60.0).abs() < 1e-9);
        assert_eq!(signals[0].period_key, PeriodKey::month(2025, 2));
    }

    #[test]
    fn test_threshold_is_strict() {
        let signals = detect(
            &spend(&[("Dining", 150.0)]),
            &spend(&[("Dining", 100.0)]),
            PeriodKey::month(2025, 2),
            50.0,
        );
        assert!(signals.is_empty());
    }

    #[test]
    fn test_zero_prior_never_flags() {
        let signals = detect(
            &spend(&[("New", 10_000.0), ("Zero", 500.0)]),
            &spend(&[("Zero", 0.0)]),
            PeriodKey::month(2025, 2),
            DEFAULT_THRESHOLD_PERCENT,
        );
        assert!(signals.is_empty());
    }

    #[test]
    fn test_decrease_and_custom_threshold() {
        let current = spend(&[("A", 50.0), ("B", 130.0), ("C", 300.0)]);
        let prior = spend(&[("A", 100.0), ("B", 100.0), ("C", 100.0)]);

        let signals = detect(&current, &prior, PeriodKey::month(2025, 2), 25.0);
        let names: Vec<_> = signals.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_detect_series() {
        let mut jan = Bucket::empty(PeriodKey::month(2025, 1));
        jan.by_category.insert("Fuel".into(), 100.0);
        let mut feb = Bucket::empty(PeriodKey::month(2025, 2));
        feb.by_category.insert("Fuel".into(), 200.0);
        let mut mar = Bucket::empty(PeriodKey::month(2025, 3));
        mar.by_category.insert("Fuel".into(), 210.0);

        let signals = detect_series(&[jan, feb, mar], DEFAULT_THRESHOLD_PERCENT);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].period_key, PeriodKey::month(2025, 2));
        assert!((signals[0].percent_increase - 100.0).abs() < 1e-9);
    }
}
