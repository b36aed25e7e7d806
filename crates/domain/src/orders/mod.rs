//! Order lifecycle controller and its commands.

mod commands;
mod edit;
mod notice;
mod service;

pub use commands::{CreateOrder, DeleteOrder, EditOrder, ServiceRef, TransitionStatus};
pub use edit::OrderEdit;
pub use notice::OrderNotice;
pub use service::{CreateOutcome, EditOutcome, OrderService, TransitionOutcome};
