use std::collections::HashMap;

use store::{Result, Store};

use crate::summary::{CompletionBucket, Period, completion_report};

/// Store-backed report runner.
pub struct ReportService<S: Store> {
    store: S,
}

impl<S: Store> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds a completion report at the given granularity from live
    /// store data.
    #[tracing::instrument(skip(self))]
    pub async fn completions(&self, period: Period) -> Result<Vec<CompletionBucket>> {
        let history = self.store.all_history().await?;
        let prices: HashMap<_, _> = self
            .store
            .list_orders()
            .await?
            .into_iter()
            .map(|order| (order.id, order.price))
            .collect();

        let report = completion_report(&history, &prices, period);
        tracing::debug!(buckets = report.len(), ?period, "completion report built");
        Ok(report)
    }
}
