//! Submitted field values for an order edit.

use common::{CustomerId, ServiceId};

/// The tracked fields an edit may submit.
///
/// `None` means "not submitted"; a submitted value equal to the current
/// one is a no-op for that field. The controller compares each field
/// explicitly, old against new, and writes one audit entry per field that
/// actually changed.
#[derive(Debug, Clone, Default)]
pub struct OrderEdit {
    /// New item count.
    pub item_count: Option<u32>,

    /// New service reference.
    pub service_id: Option<ServiceId>,

    /// New weight in kilograms.
    pub weight_kg: Option<f64>,

    /// New notes text.
    pub notes: Option<String>,

    /// New owning customer.
    pub customer_id: Option<CustomerId>,
}

impl OrderEdit {
    /// Creates an edit that submits nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a new item count.
    pub fn item_count(mut self, count: u32) -> Self {
        self.item_count = Some(count);
        self
    }

    /// Submits a new service reference.
    pub fn service_id(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    /// Submits a new weight.
    pub fn weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Submits new notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Submits a new owning customer.
    pub fn customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Returns true if the edit submits no fields at all.
    pub fn is_empty(&self) -> bool {
        self.item_count.is_none()
            && self.service_id.is_none()
            && self.weight_kg.is_none()
            && self.notes.is_none()
            && self.customer_id.is_none()
    }
}
