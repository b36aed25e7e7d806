//! Domain event handed to the external notifier.

use common::{CustomerId, OrderId, OrderNumber, OrderStatus, StaffId};
use serde::{Deserialize, Serialize};

/// Emitted after a successful create or status transition.
///
/// The in-app/SMS/email notifier consumes this and is solely responsible
/// for template selection, per-status toggles, and delivery retries; none
/// of that lives in the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNotice {
    /// The order the notice is about.
    pub order_id: OrderId,

    /// Human-presentable order number for message templates.
    pub order_number: OrderNumber,

    /// The customer to notify.
    pub customer_id: CustomerId,

    /// The status the order is now in.
    pub new_status: OrderStatus,

    /// Who triggered the change.
    pub actor: StaffId,
}
