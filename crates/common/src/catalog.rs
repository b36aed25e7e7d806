//! Catalog records: service offerings and customers.

use serde::{Deserialize, Serialize};

use crate::{CustomerId, Money, ServiceId};

/// A named service offering with a base price and an optional per-kilogram
/// rate.
///
/// Read-only from the order's perspective: pricing always works against a
/// snapshot fetched at computation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique service identifier.
    pub id: ServiceId,

    /// Display name, e.g. "Wash & Dry".
    pub name: String,

    /// Flat price charged per order.
    pub base_price: Money,

    /// Additional price per kilogram of laundry. Zero for flat-rate
    /// services.
    pub price_per_kg: Money,
}

impl Service {
    /// Creates a flat-rate service.
    pub fn flat_rate(name: impl Into<String>, base_price: Money) -> Self {
        Self {
            id: ServiceId::new(),
            name: name.into(),
            base_price,
            price_per_kg: Money::zero(),
        }
    }

    /// Creates a service priced per kilogram on top of a base price.
    pub fn per_kg(name: impl Into<String>, base_price: Money, price_per_kg: Money) -> Self {
        Self {
            id: ServiceId::new(),
            name: name.into(),
            base_price,
            price_per_kg,
        }
    }
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: CustomerId,

    /// Customer name.
    pub name: String,

    /// Phone number used by the external notifier.
    pub phone: Option<String>,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_rate_service_has_zero_per_kg() {
        let service = Service::flat_rate("Ironing", Money::from_cents(5000));
        assert_eq!(service.price_per_kg, Money::zero());
        assert_eq!(service.base_price.cents(), 5000);
    }

    #[test]
    fn service_serialization_roundtrip() {
        let service =
            Service::per_kg("Wash & Fold", Money::from_cents(10000), Money::from_cents(1500));
        let json = serde_json::to_string(&service).unwrap();
        let deserialized: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(service, deserialized);
    }
}
