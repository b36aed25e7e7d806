//! Shared data model for the laundry back-office core.
//!
//! This crate holds the records and value types that the store and the
//! domain services both speak: typed identifiers, money, the order status
//! state machine, the order record, the two append-only ledgers, and the
//! loyalty model.

pub mod catalog;
pub mod ids;
pub mod ledger;
pub mod loyalty;
pub mod money;
pub mod order;
pub mod status;
pub mod version;

pub use catalog::{Customer, Service};
pub use ids::{CustomerId, OrderId, OrderNumber, ServiceId, StaffId};
pub use ledger::{AuditAction, AuditLogEntry, StatusHistoryEntry};
pub use loyalty::{
    CustomerLoyalty, LoyaltyProgram, LoyaltyTransaction, LoyaltyTransactionKind, Tier, TierBand,
};
pub use money::Money;
pub use order::Order;
pub use status::OrderStatus;
pub use version::Version;
