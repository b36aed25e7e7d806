//! Loyalty rewards engine and administrative point operations.

pub mod engine;
mod service;

pub use engine::AccountUpdate;
pub use service::LoyaltyService;
