//! Pricing calculator.
//!
//! Pure: the same service snapshot and weight always produce the same
//! quote. The lifecycle controller re-runs the calculator on every edit
//! that touches service, item count, or weight, so a stale price can
//! never stick to an order.

use common::{Money, Service};

/// Flat prices for legacy free-text service names, in cents.
///
/// Orders written before services became catalog records carry only a
/// name; these still price against the old counter card.
const LEGACY_PRICES: &[(&str, i64)] = &[
    ("Wash & Fold", 15_000),
    ("Wash & Dry", 20_000),
    ("Dry Cleaning", 35_000),
    ("Ironing", 10_000),
    ("Full Service", 25_000),
];

/// Where a quote's amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Computed from a resolved service record.
    Service,

    /// Matched against the built-in legacy price table.
    LegacyTable,

    /// Nothing matched; the amount is zero and the caller should warn.
    Unknown,
}

/// Result of a price computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// The computed price.
    pub amount: Money,

    /// Where the amount came from.
    pub source: PriceSource,
}

impl PriceQuote {
    /// Returns true unless the price could not be determined.
    pub fn is_known(&self) -> bool {
        self.source != PriceSource::Unknown
    }
}

/// Computes the price for an order.
///
/// With a resolvable service: `base_price + price_per_kg * weight`,
/// where negative weights count as zero. Without one, the legacy name is
/// matched against the built-in table. Failing both, the quote is zero
/// with [`PriceSource::Unknown`]; that is a warning condition, not an
/// error, and the order may still proceed.
pub fn quote(service: Option<&Service>, legacy_name: Option<&str>, weight_kg: f64) -> PriceQuote {
    if let Some(service) = service {
        PriceQuote {
            amount: service.base_price + service.price_per_kg.scale(weight_kg.max(0.0)),
            source: PriceSource::Service,
        }
    } else if let Some(amount) = legacy_name.and_then(legacy_price) {
        PriceQuote {
            amount,
            source: PriceSource::LegacyTable,
        }
    } else {
        PriceQuote {
            amount: Money::zero(),
            source: PriceSource::Unknown,
        }
    }
}

/// Looks up a legacy free-text service name in the built-in price table.
pub fn legacy_price(name: &str) -> Option<Money> {
    let name = name.trim();
    LEGACY_PRICES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, cents)| Money::from_cents(cents))
}
