use common::{OrderId, OrderNumber, Version};
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A concurrency conflict occurred when committing.
    /// The expected order version did not match the stored version.
    #[error(
        "Concurrency conflict for order {order_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        order_id: OrderId,
        expected: Version,
        actual: Version,
    },

    /// An insert collided with an existing order number.
    #[error("Duplicate order number: {0}")]
    DuplicateOrderNumber(OrderNumber),

    /// A commit targeted an order that is not in the store.
    #[error("Order not in store: {0}")]
    OrderMissing(OrderId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
