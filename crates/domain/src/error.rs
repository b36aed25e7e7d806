//! Domain error taxonomy.

use common::{CustomerId, OrderId, OrderStatus, ServiceId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
///
/// None of these are retried inside the core; retry policy belongs to the
/// caller. A `PriceUnknown` condition is deliberately absent here: an
/// unpriceable order still goes through, and callers learn about it from
/// the outcome's price source.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Referenced service does not exist.
    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    /// Referenced order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The requested status change would move the order backward or
    /// sideways between terminal states.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The caller lacks the capability required to delete an order.
    #[error("Deleting orders requires administrator privilege")]
    Forbidden,

    /// A redemption asked for more points than the account holds.
    #[error("Insufficient balance: requested {requested} points, balance is {balance}")]
    InsufficientBalance { requested: i64, balance: i64 },

    /// Manual award, redemption, and bulk award require a positive
    /// point amount.
    #[error("Point amount must be positive, got {0}")]
    NonPositivePoints(i64),

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
