//! Persistence seam for the laundry back-office core.
//!
//! The core assumes nothing stronger than atomic apply of a single
//! [`Commit`]: one order row write plus the ledger rows that belong to the
//! same operation. [`InMemoryStore`] is the reference implementation.

pub mod error;
pub mod memory;
pub mod store;

pub use common::Version;
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use store::{Commit, Store};
