//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Status moves forward only:
/// ```text
/// Received ──┬──► ReadyForPickup ──► Completed
///            └────────────────────► Completed
/// ```
/// `PickedUp` is a legacy alias for the terminal state kept for older
/// records; it carries the same rank as `Completed` and is equivalent for
/// reporting and reward purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been taken in at the counter.
    #[default]
    Received,

    /// Laundry is done and waiting for the customer.
    ReadyForPickup,

    /// Order was handed over and paid (terminal state).
    Completed,

    /// Legacy terminal alias of `Completed`.
    PickedUp,
}

impl OrderStatus {
    /// Forward rank of the status. Transitions must strictly increase it.
    fn rank(&self) -> u8 {
        match self {
            OrderStatus::Received => 0,
            OrderStatus::ReadyForPickup => 1,
            OrderStatus::Completed | OrderStatus::PickedUp => 2,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.rank() == 2
    }

    /// Returns true if the order may advance from this status to `next`.
    ///
    /// Backward motion is rejected, as is a move between the two distinct
    /// terminal values (which would otherwise re-fire completion side
    /// effects). A same-value "transition" is not an advance; callers
    /// treat it as a no-op.
    pub fn can_advance_to(&self, next: OrderStatus) -> bool {
        next.rank() > self.rank()
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::ReadyForPickup => "ReadyForPickup",
            OrderStatus::Completed => "Completed",
            OrderStatus::PickedUp => "PickedUp",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
