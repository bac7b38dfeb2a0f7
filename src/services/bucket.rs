//! Period bucketing
//!
//! Groups transactions into one bucket per period of a window. Every period
//! in the window gets a bucket, even when nothing happened in it, so chart
//! axes stay continuous.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::models::{Bucket, BucketMode, PeriodKey, Transaction, Window};

use super::category::CategoryResolver;

/// Groups transactions into period buckets
pub struct BucketService<'a> {
    resolver: &'a CategoryResolver<'a>,
}

impl<'a> BucketService<'a> {
    /// Create a new bucket service
    pub fn new(resolver: &'a CategoryResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Bucket transactions for every period of `mode` in `window`
    ///
    /// The output always has one bucket per period key of the window, in
    /// order. Transactions without a parsable date, or outside the window,
    /// are skipped.
    pub fn bucket(
        &self,
        transactions: &[Transaction],
        mode: BucketMode,
        window: &Window,
    ) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = window
            .period_keys(mode)
            .into_iter()
            .map(Bucket::empty)
            .collect();

        let index: HashMap<PeriodKey, usize> = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (b.period_key, i))
            .collect();

        let mut skipped = 0usize;
        for txn in transactions {
            let Some(date) = txn.date.filter(|d| window.contains(*d)) else {
                skipped += 1;
                continue;
            };

            let key = PeriodKey::for_date(mode, date);
            match index.get(&key) {
                Some(&i) => {
                    let category = if txn.is_expense() {
                        self.resolver.resolve(txn.category_ref.as_ref())
                    } else {
                        String::new()
                    };
                    buckets[i].fold(txn, &category);
                }
                None => {
                    trace!(txn = %txn.id, key = %key, "no bucket for period key");
                    skipped += 1;
                }
            }
        }

        debug!(
            mode = %mode,
            window = %window,
            buckets = buckets.len(),
            folded = transactions.len() - skipped,
            skipped,
            "bucketed transactions"
        );

        buckets
    }

    /// Bucket the whole window into a single bucket keyed by its first period
    ///
    /// Used for month-level totals (budget checks, anomaly comparisons).
    pub fn total(&self, transactions: &[Transaction], mode: BucketMode, window: &Window) -> Bucket {
        let key = PeriodKey::for_date(mode, window.start_date());
        let mut total = Bucket::empty(key);

        for txn in transactions {
            if txn.date.is_some_and(|d| window.contains(d)) {
                let category = if txn.is_expense() {
                    self.resolver.resolve(txn.category_ref.as_ref())
                } else {
                    String::new()
                };
                total.fold(txn, &category);
            }
        }

        total
    }
}
