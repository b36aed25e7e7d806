//! Order lifecycle and loyalty rewards engine.
//!
//! This crate is the back-office core: it turns a created order into
//! priced, tracked, auditable, and rewarded business state. The
//! [`orders::OrderService`] controller validates transitions, recomputes
//! prices, writes both ledgers, and fires the rewards engine exactly once
//! per completion; [`loyalty::LoyaltyService`] covers the administrative
//! point operations.

pub mod error;
pub mod loyalty;
pub mod orders;
pub mod pricing;

pub use error::DomainError;
pub use loyalty::{AccountUpdate, LoyaltyService};
pub use orders::{
    CreateOrder, CreateOutcome, DeleteOrder, EditOrder, EditOutcome, OrderEdit, OrderNotice,
    OrderService, ServiceRef, TransitionOutcome, TransitionStatus,
};
pub use pricing::{PriceQuote, PriceSource};
