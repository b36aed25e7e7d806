//! Loyalty program configuration, per-customer accounts, and the points
//! ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, Money, OrderId};

/// A loyalty tier, derived from cumulative points earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tier {
    /// Default floor tier.
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Returns the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tier band of a loyalty program: the points threshold at which the
/// band starts and the reward multiplier it grants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    /// Cumulative earned points at which this band starts.
    pub threshold: i64,

    /// Reward multiplier applied to accrual while in this band.
    pub multiplier: f64,
}

/// Active loyalty program configuration.
///
/// Configuration data, read-only from the rewards engine's perspective and
/// passed to it explicitly by the caller. Thresholds are expected to be
/// increasing Bronze through Platinum; multipliers are treated as
/// configuration and not validated beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    /// Points earned per currency unit spent, before the tier multiplier.
    pub points_per_unit: f64,

    /// Bronze band. Its threshold is the floor and is normally zero.
    pub bronze: TierBand,

    /// Silver band.
    pub silver: TierBand,

    /// Gold band.
    pub gold: TierBand,

    /// Platinum band.
    pub platinum: TierBand,
}

impl LoyaltyProgram {
    /// The default shop configuration.
    pub fn standard() -> Self {
        Self {
            points_per_unit: 1.0,
            bronze: TierBand {
                threshold: 0,
                multiplier: 1.0,
            },
            silver: TierBand {
                threshold: 500,
                multiplier: 1.25,
            },
            gold: TierBand {
                threshold: 2000,
                multiplier: 1.5,
            },
            platinum: TierBand {
                threshold: 5000,
                multiplier: 2.0,
            },
        }
    }

    /// Derives the tier for a cumulative earned-points total.
    ///
    /// The highest qualifying band wins; Bronze is the floor even when the
    /// total sits below its threshold.
    pub fn tier_for(&self, total_earned: i64) -> Tier {
        if total_earned >= self.platinum.threshold {
            Tier::Platinum
        } else if total_earned >= self.gold.threshold {
            Tier::Gold
        } else if total_earned >= self.silver.threshold {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Returns the band for a tier.
    pub fn band(&self, tier: Tier) -> TierBand {
        match tier {
            Tier::Bronze => self.bronze,
            Tier::Silver => self.silver,
            Tier::Gold => self.gold,
            Tier::Platinum => self.platinum,
        }
    }
}

/// Per-customer loyalty account.
///
/// `balance == total_earned - total_redeemed` holds after every mutation,
/// and the tier is always re-derived from `total_earned` against the
/// active program, never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLoyalty {
    /// The customer this account belongs to.
    pub customer_id: CustomerId,

    /// Current spendable points.
    pub balance: i64,

    /// Cumulative points earned over the account's lifetime.
    pub total_earned: i64,

    /// Cumulative points redeemed (including forfeits from resets).
    pub total_redeemed: i64,

    /// Current tier label.
    pub tier: Tier,

    /// Number of completed orders counted into this account.
    pub total_orders: u64,

    /// Total amount spent across counted orders.
    pub total_spent: Money,

    /// Timestamp of the most recent counted order.
    pub last_order_at: Option<DateTime<Utc>>,
}

impl CustomerLoyalty {
    /// Creates a fresh account with all counters at zero.
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            balance: 0,
            total_earned: 0,
            total_redeemed: 0,
            tier: Tier::Bronze,
            total_orders: 0,
            total_spent: Money::zero(),
            last_order_at: None,
        }
    }
}

/// Kind of loyalty ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoyaltyTransactionKind {
    /// Points accrued from a completed order or a manual award.
    Earned,

    /// Points spent by the customer.
    Redeemed,

    /// Balance forfeited by an administrative reset.
    Reset,
}

/// Append-only loyalty ledger row.
///
/// The sum of deltas for an account always equals that account's current
/// balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyTransaction {
    /// The account the row belongs to.
    pub customer_id: CustomerId,

    /// Row kind.
    pub kind: LoyaltyTransactionKind,

    /// Signed point delta: positive for earned, negative for redeemed and
    /// reset rows.
    pub delta: i64,

    /// Free-text description.
    pub description: String,

    /// The order that produced the row, when there is one.
    pub order_id: Option<OrderId>,

    /// When the row was written.
    pub at: DateTime<Utc>,
}

impl LoyaltyTransaction {
    /// Creates a ledger row stamped with the current time.
    pub fn new(
        customer_id: CustomerId,
        kind: LoyaltyTransactionKind,
        delta: i64,
        description: impl Into<String>,
        order_id: Option<OrderId>,
    ) -> Self {
        Self {
            customer_id,
            kind,
            delta,
            description: description.into(),
            order_id,
            at: Utc::now(),
        }
    }
}
