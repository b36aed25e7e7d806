//! The order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, Money, OrderId, OrderNumber, OrderStatus, ServiceId, StaffId, Version};

/// A customer's laundry job.
///
/// The price field is always the pricing function of the current service,
/// item count, and weight; it is recomputed by the lifecycle controller on
/// every edit that touches one of those fields and never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Internal key.
    pub id: OrderId,

    /// Immutable human-presentable identifier.
    pub number: OrderNumber,

    /// The customer the job belongs to.
    pub customer_id: CustomerId,

    /// Resolvable service reference, if any.
    pub service_id: Option<ServiceId>,

    /// Free-text service name, kept as a legacy fallback when the
    /// reference cannot be resolved.
    pub service_name: Option<String>,

    /// Number of garments/items. Not part of the price formula but
    /// tracked and audited.
    pub item_count: u32,

    /// Weight in kilograms. Zero for flat-rate jobs.
    pub weight_kg: f64,

    /// Computed price.
    pub price: Money,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Free-text notes.
    pub notes: String,

    /// Number of accepted mutations that changed at least one tracked
    /// field.
    pub edit_count: u32,

    /// Who last mutated the order.
    pub last_edited_by: Option<StaffId>,

    /// When the order was last mutated.
    pub last_edited_at: Option<DateTime<Utc>>,

    /// True once any accepted mutation has been applied.
    pub is_modified: bool,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// Row version for optimistic concurrency.
    pub version: Version,
}

impl Order {
    /// Creates a freshly received order.
    #[allow(clippy::too_many_arguments)]
    pub fn received(
        customer_id: CustomerId,
        service_id: Option<ServiceId>,
        service_name: Option<String>,
        item_count: u32,
        weight_kg: f64,
        price: Money,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            number: OrderNumber::generate(),
            customer_id,
            service_id,
            service_name,
            item_count,
            weight_kg,
            price,
            status: OrderStatus::Received,
            notes: notes.into(),
            edit_count: 0,
            last_edited_by: None,
            last_edited_at: None,
            is_modified: false,
            created_at: Utc::now(),
            version: Version::first(),
        }
    }

    /// Records an accepted mutation: bumps the edit counter, stamps the
    /// actor and time, and marks the order modified.
    pub fn record_mutation(&mut self, actor: StaffId, at: DateTime<Utc>) {
        self.edit_count += 1;
        self.last_edited_by = Some(actor);
        self.last_edited_at = Some(at);
        self.is_modified = true;
        self.version = self.version.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn received_order_starts_clean() {
        let order = Order::received(
            CustomerId::new(),
            None,
            Some("Wash & Dry".to_string()),
            5,
            0.0,
            Money::from_major(200),
            "",
        );
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.edit_count, 0);
        assert!(!order.is_modified);
        assert_eq!(order.version, Version::first());
    }

    #[test]
    fn record_mutation_bumps_counter_and_version() {
        let mut order = Order::received(
            CustomerId::new(),
            None,
            None,
            1,
            0.0,
            Money::zero(),
            "",
        );
        let actor = StaffId::new();
        order.record_mutation(actor, Utc::now());

        assert_eq!(order.edit_count, 1);
        assert_eq!(order.last_edited_by, Some(actor));
        assert!(order.is_modified);
        assert_eq!(order.version, Version::new(2));
    }
}
