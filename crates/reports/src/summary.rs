//! Pure aggregation of completion events into calendar buckets.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use common::{Money, OrderId, StatusHistoryEntry};
use serde::{Deserialize, Serialize};

/// Calendar granularity for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Maps a timestamp to the first day of its bucket.
    ///
    /// Weekly buckets start on Monday; monthly buckets on the first of
    /// the month.
    pub fn bucket(&self, at: DateTime<Utc>) -> NaiveDate {
        let date = at.date_naive();
        match self {
            Period::Daily => date,
            Period::Weekly => {
                let offset = date.weekday().num_days_from_monday();
                date - Duration::days(i64::from(offset))
            }
            Period::Monthly => date.with_day(1).unwrap_or(date),
        }
    }
}

/// Completed-order count and revenue for one calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionBucket {
    /// First day of the bucket.
    pub period_start: NaiveDate,

    /// Number of orders first completed in this bucket.
    pub orders: u64,

    /// Sum of the prices of those orders.
    pub revenue: Money,
}

/// Aggregates completion entries into chronologically ordered buckets.
///
/// Only the first completion entry per order counts; an order whose
/// price is absent from `prices` is skipped rather than counted at
/// zero, since a missing row means the order was deleted.
pub fn completion_report(
    history: &[StatusHistoryEntry],
    prices: &HashMap<OrderId, Money>,
    period: Period,
) -> Vec<CompletionBucket> {
    let mut buckets: std::collections::BTreeMap<NaiveDate, (u64, Money)> =
        std::collections::BTreeMap::new();
    let mut seen: HashSet<OrderId> = HashSet::new();

    for entry in history {
        if !entry.is_completion() || !seen.insert(entry.order_id) {
            continue;
        }
        let Some(price) = prices.get(&entry.order_id) else {
            continue;
        };
        let slot = buckets
            .entry(period.bucket(entry.at))
            .or_insert((0, Money::zero()));
        slot.0 += 1;
        slot.1 += *price;
    }

    buckets
        .into_iter()
        .map(|(period_start, (orders, revenue))| CompletionBucket {
            period_start,
            orders,
            revenue,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::{OrderStatus, StaffId};

    fn completion_at(order_id: OrderId, at: DateTime<Utc>) -> StatusHistoryEntry {
        let mut entry = StatusHistoryEntry::new(
            order_id,
            Some(OrderStatus::ReadyForPickup),
            OrderStatus::Completed,
            StaffId::new(),
            None,
        );
        entry.at = at;
        entry
    }

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn daily_buckets_group_by_calendar_day() {
        let a = OrderId::new();
        let b = OrderId::new();
        let c = OrderId::new();
        let history = vec![
            completion_at(a, ts(2024, 3, 4)),
            completion_at(b, ts(2024, 3, 4)),
            completion_at(c, ts(2024, 3, 6)),
        ];
        let prices = HashMap::from([
            (a, Money::from_major(150)),
            (b, Money::from_major(200)),
            (c, Money::from_major(100)),
        ]);

        let report = completion_report(&history, &prices, Period::Daily);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].orders, 2);
        assert_eq!(report[0].revenue, Money::from_major(350));
        assert_eq!(
            report[0].period_start,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(report[1].orders, 1);
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        // 2024-03-06 is a Wednesday; its week starts 2024-03-04.
        assert_eq!(
            Period::Weekly.bucket(ts(2024, 3, 6)),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        // A Monday maps to itself.
        assert_eq!(
            Period::Weekly.bucket(ts(2024, 3, 4)),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }

    #[test]
    fn monthly_buckets_use_first_of_month() {
        assert_eq!(
            Period::Monthly.bucket(ts(2024, 3, 28)),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn each_order_counts_once() {
        let a = OrderId::new();
        // Two completion rows for the same order, e.g. replayed input.
        let history = vec![
            completion_at(a, ts(2024, 3, 4)),
            completion_at(a, ts(2024, 3, 5)),
        ];
        let prices = HashMap::from([(a, Money::from_major(150))]);

        let report = completion_report(&history, &prices, Period::Daily);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].orders, 1);
    }

    #[test]
    fn non_terminal_transitions_are_ignored() {
        let a = OrderId::new();
        let entry = StatusHistoryEntry::new(
            a,
            Some(OrderStatus::Received),
            OrderStatus::ReadyForPickup,
            StaffId::new(),
            None,
        );
        let prices = HashMap::from([(a, Money::from_major(150))]);

        let report = completion_report(&[entry], &prices, Period::Daily);
        assert!(report.is_empty());
    }

    #[test]
    fn orders_without_a_price_row_are_skipped() {
        let history = vec![completion_at(OrderId::new(), ts(2024, 3, 4))];
        let report = completion_report(&history, &HashMap::new(), Period::Daily);
        assert!(report.is_empty());
    }
}
