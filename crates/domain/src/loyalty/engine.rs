//! Pure rewards computations.
//!
//! Every function here maps an account snapshot to its updated state plus
//! exactly one ledger row, without touching the store; callers put both
//! into the same commit as the rest of the operation. This keeps the
//! balance identity (`balance == earned - redeemed`, and the per-account
//! delta sum equals the balance) checkable row by row.

use common::{CustomerLoyalty, LoyaltyProgram, LoyaltyTransaction, LoyaltyTransactionKind, Order};

use crate::error::{DomainError, Result};

/// An account mutation paired with the single ledger row that records it.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    /// The account after the mutation.
    pub account: CustomerLoyalty,

    /// The ledger row to append alongside it.
    pub transaction: LoyaltyTransaction,
}

/// Accrues points for a completed order.
///
/// The tier and multiplier come from the points earned *before* this
/// order; the award is `round(price * points_per_unit * multiplier)`,
/// rounded half-up. Rounding happens per order, never on a running
/// total, so many small orders do not drift.
pub fn accrue(
    account: &CustomerLoyalty,
    program: &LoyaltyProgram,
    order: &Order,
) -> AccountUpdate {
    let tier = program.tier_for(account.total_earned);
    let multiplier = program.band(tier).multiplier;
    let points =
        (order.price.major_units() * program.points_per_unit * multiplier).round() as i64;

    let transaction = LoyaltyTransaction::new(
        account.customer_id,
        LoyaltyTransactionKind::Earned,
        points,
        format!("Completed order {}", order.number),
        Some(order.id),
    );

    let mut account = account.clone();
    account.balance += points;
    account.total_earned += points;
    account.total_orders += 1;
    account.total_spent += order.price;
    account.last_order_at = Some(transaction.at);
    account.tier = program.tier_for(account.total_earned);

    AccountUpdate {
        account,
        transaction,
    }
}

/// Grants points administratively, outside any order.
///
/// No multiplier applies; the amount is credited as given. Order counters
/// are untouched.
pub fn manual_award(
    account: &CustomerLoyalty,
    program: &LoyaltyProgram,
    points: i64,
    description: &str,
) -> AccountUpdate {
    let transaction = LoyaltyTransaction::new(
        account.customer_id,
        LoyaltyTransactionKind::Earned,
        points,
        description,
        None,
    );

    let mut account = account.clone();
    account.balance += points;
    account.total_earned += points;
    account.tier = program.tier_for(account.total_earned);

    AccountUpdate {
        account,
        transaction,
    }
}

/// Spends points from an account.
///
/// Fails with `InsufficientBalance` when the account holds fewer points
/// than requested; on failure nothing is produced, so no ledger row can
/// exist for a rejected redemption.
pub fn redeem(
    account: &CustomerLoyalty,
    program: &LoyaltyProgram,
    points: i64,
    description: &str,
) -> Result<AccountUpdate> {
    if points > account.balance {
        return Err(DomainError::InsufficientBalance {
            requested: points,
            balance: account.balance,
        });
    }

    let transaction = LoyaltyTransaction::new(
        account.customer_id,
        LoyaltyTransactionKind::Redeemed,
        -points,
        description,
        None,
    );

    let mut account = account.clone();
    account.balance -= points;
    account.total_redeemed += points;
    account.tier = program.tier_for(account.total_earned);

    Ok(AccountUpdate {
        account,
        transaction,
    })
}

/// Forfeits an account's balance.
///
/// Returns None for an account already at zero: a reset writes a ledger
/// row only where it changes something. The forfeited points count into
/// total redeemed so the balance identity survives the reset.
pub fn reset(account: &CustomerLoyalty) -> Option<AccountUpdate> {
    if account.balance == 0 {
        return None;
    }

    let transaction = LoyaltyTransaction::new(
        account.customer_id,
        LoyaltyTransactionKind::Reset,
        -account.balance,
        "Balance reset",
        None,
    );

    let mut account = account.clone();
    account.total_redeemed += account.balance;
    account.balance = 0;

    Some(AccountUpdate {
        account,
        transaction,
    })
}
