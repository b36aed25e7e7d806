use async_trait::async_trait;

use common::{
    AuditLogEntry, Customer, CustomerId, CustomerLoyalty, LoyaltyTransaction, Order, OrderId,
    OrderNumber, Service, ServiceId, StatusHistoryEntry, Version,
};

use crate::Result;

/// One atomic unit of work against the store.
///
/// A commit bundles the order row mutation with the ledger rows written at
/// the same call site: audit entries, status-history entries, and loyalty
/// account/ledger updates. Implementations apply a commit all-or-nothing;
/// a failed version check leaves the store untouched.
#[derive(Debug, Clone, Default)]
pub struct Commit {
    /// Order row to insert or replace.
    pub upsert_order: Option<Order>,

    /// Expected stored version of the targeted order row.
    /// `Version::initial()` means the row must not exist yet; `None`
    /// skips the check (used by loyalty-only commits).
    pub expected_version: Option<Version>,

    /// Order row to remove.
    pub remove_order: Option<OrderId>,

    /// Remove all status-history rows for this order first. Used by the
    /// delete path; audit rows are never purged.
    pub purge_history: Option<OrderId>,

    /// Audit ledger rows to append.
    pub audit: Vec<AuditLogEntry>,

    /// Status-history ledger rows to append.
    pub history: Vec<StatusHistoryEntry>,

    /// Loyalty accounts to insert or replace.
    pub loyalty_accounts: Vec<CustomerLoyalty>,

    /// Loyalty ledger rows to append.
    pub loyalty_transactions: Vec<LoyaltyTransaction>,
}

impl Commit {
    /// Creates an empty commit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order row to insert or replace.
    pub fn order(mut self, order: Order) -> Self {
        self.upsert_order = Some(order);
        self
    }

    /// Expects the targeted order row to not exist yet.
    pub fn expect_new(mut self) -> Self {
        self.expected_version = Some(Version::initial());
        self
    }

    /// Expects the targeted order row to be at a specific stored version.
    pub fn expect_version(mut self, version: Version) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Removes the order row.
    pub fn remove_order(mut self, order_id: OrderId) -> Self {
        self.remove_order = Some(order_id);
        self
    }

    /// Purges the status-history rows for an order.
    pub fn purge_history(mut self, order_id: OrderId) -> Self {
        self.purge_history = Some(order_id);
        self
    }

    /// Appends an audit ledger row.
    pub fn audit(mut self, entry: AuditLogEntry) -> Self {
        self.audit.push(entry);
        self
    }

    /// Appends a status-history ledger row.
    pub fn history(mut self, entry: StatusHistoryEntry) -> Self {
        self.history.push(entry);
        self
    }

    /// Upserts a loyalty account together with its ledger row.
    pub fn loyalty(mut self, account: CustomerLoyalty, transaction: LoyaltyTransaction) -> Self {
        self.loyalty_accounts.push(account);
        self.loyalty_transactions.push(transaction);
        self
    }
}

/// Core trait for store implementations.
///
/// All implementations must be thread-safe (Send + Sync) and must apply
/// [`Commit`]s atomically with the version check serializing concurrent
/// writers on the same order row.
#[async_trait]
pub trait Store: Send + Sync {
    /// Applies a commit atomically.
    ///
    /// Fails with `ConcurrencyConflict` when `expected_version` does not
    /// match the stored row, in which case nothing is applied.
    async fn commit(&self, commit: Commit) -> Result<()>;

    /// Fetches an order by its internal id.
    async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Fetches an order by its human-presentable number.
    async fn get_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>>;

    /// Returns all orders.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Returns the audit trail for an order, oldest first.
    async fn audit_for_order(&self, order_id: OrderId) -> Result<Vec<AuditLogEntry>>;

    /// Returns the status history for an order, oldest first.
    async fn history_for_order(&self, order_id: OrderId) -> Result<Vec<StatusHistoryEntry>>;

    /// Returns the full status-history ledger, oldest first.
    async fn all_history(&self) -> Result<Vec<StatusHistoryEntry>>;

    /// Fetches a customer's loyalty account.
    async fn loyalty_account(&self, customer_id: CustomerId) -> Result<Option<CustomerLoyalty>>;

    /// Returns all loyalty accounts.
    async fn loyalty_accounts(&self) -> Result<Vec<CustomerLoyalty>>;

    /// Returns the loyalty ledger rows for a customer, oldest first.
    async fn transactions_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LoyaltyTransaction>>;

    /// Fetches a customer record.
    async fn get_customer(&self, customer_id: CustomerId) -> Result<Option<Customer>>;

    /// Inserts a customer record.
    async fn insert_customer(&self, customer: Customer) -> Result<()>;

    /// Fetches a service record.
    async fn get_service(&self, service_id: ServiceId) -> Result<Option<Service>>;

    /// Inserts a service record.
    async fn insert_service(&self, service: Service) -> Result<()>;
}
