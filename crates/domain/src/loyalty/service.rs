//! Administrative loyalty operations.

use std::collections::HashMap;

use common::{CustomerId, CustomerLoyalty, LoyaltyProgram};
use store::{Commit, Store};

use crate::error::{DomainError, Result};

use super::engine;

/// Service for the administrative point operations: manual awards,
/// redemptions, bulk awards, and resets.
///
/// Order-completion accrual does not go through here; the lifecycle
/// controller commits it together with the transition.
pub struct LoyaltyService<S: Store> {
    store: S,
}

impl<S: Store> LoyaltyService<S> {
    /// Creates a new loyalty service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Grants points to a customer outside any order.
    #[tracing::instrument(skip(self, program))]
    pub async fn manual_award(
        &self,
        customer_id: CustomerId,
        points: i64,
        description: &str,
        program: &LoyaltyProgram,
    ) -> Result<CustomerLoyalty> {
        require_positive(points)?;

        let account = self.load_or_new(customer_id).await?;
        let update = engine::manual_award(&account, program, points, description);
        let updated = update.account.clone();

        self.store
            .commit(Commit::new().loyalty(update.account, update.transaction))
            .await?;

        metrics::counter!("loyalty_points_awarded_total").increment(points as u64);
        tracing::info!(customer = %customer_id, points, "manual award");
        Ok(updated)
    }

    /// Spends points from a customer's balance.
    ///
    /// Fails with `InsufficientBalance` before anything is written; a
    /// rejected redemption leaves no ledger row and no balance change.
    #[tracing::instrument(skip(self, program))]
    pub async fn redeem(
        &self,
        customer_id: CustomerId,
        points: i64,
        description: &str,
        program: &LoyaltyProgram,
    ) -> Result<CustomerLoyalty> {
        require_positive(points)?;

        let account = self.load_or_new(customer_id).await?;
        let update = engine::redeem(&account, program, points, description)?;
        let updated = update.account.clone();

        self.store
            .commit(Commit::new().loyalty(update.account, update.transaction))
            .await?;

        metrics::counter!("loyalty_points_redeemed_total").increment(points as u64);
        tracing::info!(customer = %customer_id, points, "points redeemed");
        Ok(updated)
    }

    /// Grants the same amount of points to several customers in one
    /// atomic commit, one ledger row per award.
    ///
    /// A customer id listed more than once is awarded once per listing;
    /// later awards build on the earlier ones, so the final account row
    /// always matches the sum of its ledger rows.
    #[tracing::instrument(skip(self, program))]
    pub async fn bulk_award(
        &self,
        customer_ids: &[CustomerId],
        points: i64,
        description: &str,
        program: &LoyaltyProgram,
    ) -> Result<u64> {
        require_positive(points)?;

        let mut accounts: HashMap<CustomerId, CustomerLoyalty> = HashMap::new();
        let mut transactions = Vec::with_capacity(customer_ids.len());
        for &customer_id in customer_ids {
            let account = match accounts.remove(&customer_id) {
                Some(account) => account,
                None => self.load_or_new(customer_id).await?,
            };
            let update = engine::manual_award(&account, program, points, description);
            transactions.push(update.transaction);
            accounts.insert(customer_id, update.account);
        }

        let awarded = transactions.len() as u64;
        if awarded > 0 {
            let mut commit = Commit::new();
            commit.loyalty_accounts = accounts.into_values().collect();
            commit.loyalty_transactions = transactions;
            self.store.commit(commit).await?;
            metrics::counter!("loyalty_points_awarded_total")
                .increment(points as u64 * awarded);
        }
        tracing::info!(awards = awarded, points, "bulk award");
        Ok(awarded)
    }

    /// Zeroes every balance, writing one `Reset` row of `-balance` per
    /// account that held anything. Returns the number of accounts reset.
    #[tracing::instrument(skip(self))]
    pub async fn reset_all(&self) -> Result<u64> {
        let accounts = self.store.loyalty_accounts().await?;

        let mut commit = Commit::new();
        let mut reset = 0u64;
        for account in &accounts {
            if let Some(update) = engine::reset(account) {
                commit = commit.loyalty(update.account, update.transaction);
                reset += 1;
            }
        }

        if reset > 0 {
            self.store.commit(commit).await?;
        }
        tracing::info!(accounts = reset, "all balances reset");
        Ok(reset)
    }

    /// Fetches a customer's account, if one exists.
    pub async fn account(&self, customer_id: CustomerId) -> Result<Option<CustomerLoyalty>> {
        Ok(self.store.loyalty_account(customer_id).await?)
    }

    async fn load_or_new(&self, customer_id: CustomerId) -> Result<CustomerLoyalty> {
        Ok(self
            .store
            .loyalty_account(customer_id)
            .await?
            .unwrap_or_else(|| CustomerLoyalty::new(customer_id)))
    }
}

fn require_positive(points: i64) -> Result<()> {
    if points <= 0 {
        return Err(DomainError::NonPositivePoints(points));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{LoyaltyTransactionKind, Tier};
    use store::InMemoryStore;

    async fn balance_matches_ledger(store: &InMemoryStore, customer_id: CustomerId) {
        let account = store.loyalty_account(customer_id).await.unwrap().unwrap();
        let ledger_sum: i64 = store
            .transactions_for_customer(customer_id)
            .await
            .unwrap()
            .iter()
            .map(|t| t.delta)
            .sum();
        assert_eq!(account.balance, ledger_sum);
        assert_eq!(account.balance, account.total_earned - account.total_redeemed);
    }

    #[tokio::test]
    async fn manual_award_creates_account() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store.clone());
        let program = LoyaltyProgram::standard();
        let customer_id = CustomerId::new();

        let account = service
            .manual_award(customer_id, 600, "Opening promo", &program)
            .await
            .unwrap();

        assert_eq!(account.balance, 600);
        assert_eq!(account.tier, Tier::Silver);
        balance_matches_ledger(&store, customer_id).await;
    }

    #[tokio::test]
    async fn rejected_redemption_writes_nothing() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store.clone());
        let program = LoyaltyProgram::standard();
        let customer_id = CustomerId::new();

        service
            .manual_award(customer_id, 100, "Promo", &program)
            .await
            .unwrap();

        let result = service
            .redeem(customer_id, 500, "Discount", &program)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::InsufficientBalance { .. })
        ));

        let account = store.loyalty_account(customer_id).await.unwrap().unwrap();
        assert_eq!(account.balance, 100);
        assert_eq!(
            store
                .transactions_for_customer(customer_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn award_redeem_reset_keeps_invariant() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store.clone());
        let program = LoyaltyProgram::standard();
        let customer_id = CustomerId::new();

        service
            .manual_award(customer_id, 400, "Promo", &program)
            .await
            .unwrap();
        service
            .redeem(customer_id, 150, "Discount", &program)
            .await
            .unwrap();
        balance_matches_ledger(&store, customer_id).await;

        let reset = service.reset_all().await.unwrap();
        assert_eq!(reset, 1);
        balance_matches_ledger(&store, customer_id).await;

        let account = store.loyalty_account(customer_id).await.unwrap().unwrap();
        assert_eq!(account.balance, 0);

        let rows = store.transactions_for_customer(customer_id).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].kind, LoyaltyTransactionKind::Reset);
        assert_eq!(rows[2].delta, -250);
    }

    #[tokio::test]
    async fn reset_skips_zero_balances() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store.clone());
        let program = LoyaltyProgram::standard();
        let customer_id = CustomerId::new();

        service
            .manual_award(customer_id, 100, "Promo", &program)
            .await
            .unwrap();
        service
            .redeem(customer_id, 100, "Discount", &program)
            .await
            .unwrap();

        assert_eq!(service.reset_all().await.unwrap(), 0);
        assert_eq!(
            store
                .transactions_for_customer(customer_id)
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn bulk_award_touches_every_account() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store.clone());
        let program = LoyaltyProgram::standard();
        let customers = [CustomerId::new(), CustomerId::new(), CustomerId::new()];

        let awarded = service
            .bulk_award(&customers, 50, "Anniversary", &program)
            .await
            .unwrap();
        assert_eq!(awarded, 3);

        for customer_id in customers {
            let account = store.loyalty_account(customer_id).await.unwrap().unwrap();
            assert_eq!(account.balance, 50);
            balance_matches_ledger(&store, customer_id).await;
        }
    }

    #[tokio::test]
    async fn bulk_award_folds_duplicate_customers() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store.clone());
        let program = LoyaltyProgram::standard();
        let customer_id = CustomerId::new();

        let awarded = service
            .bulk_award(&[customer_id, customer_id], 50, "Anniversary", &program)
            .await
            .unwrap();
        assert_eq!(awarded, 2);

        // The second award builds on the first; the account row must
        // agree with its two ledger rows.
        let account = store.loyalty_account(customer_id).await.unwrap().unwrap();
        assert_eq!(account.balance, 100);
        assert_eq!(
            store
                .transactions_for_customer(customer_id)
                .await
                .unwrap()
                .len(),
            2
        );
        balance_matches_ledger(&store, customer_id).await;
    }

    #[tokio::test]
    async fn non_positive_points_rejected() {
        let store = InMemoryStore::new();
        let service = LoyaltyService::new(store);
        let program = LoyaltyProgram::standard();

        let result = service
            .manual_award(CustomerId::new(), 0, "Nothing", &program)
            .await;
        assert!(matches!(result, Err(DomainError::NonPositivePoints(0))));

        let result = service
            .redeem(CustomerId::new(), -5, "Nothing", &program)
            .await;
        assert!(matches!(result, Err(DomainError::NonPositivePoints(-5))));
    }
}
