use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{
    AuditLogEntry, Customer, CustomerId, CustomerLoyalty, LoyaltyTransaction, Order, OrderId,
    OrderNumber, Service, ServiceId, StatusHistoryEntry, Version,
};

use crate::{
    Result, StoreError,
    store::{Commit, Store},
};

#[derive(Default)]
struct State {
    orders: HashMap<OrderId, Order>,
    audit: Vec<AuditLogEntry>,
    history: Vec<StatusHistoryEntry>,
    loyalty: HashMap<CustomerId, CustomerLoyalty>,
    loyalty_transactions: Vec<LoyaltyTransaction>,
    customers: HashMap<CustomerId, Customer>,
    services: HashMap<ServiceId, Service>,
}

/// In-memory store implementation for tests and single-process use.
///
/// A single `RwLock` over the whole state makes every commit atomic: the
/// version check and all row writes happen under one write guard.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns the total number of audit rows stored.
    pub async fn audit_count(&self) -> usize {
        self.state.read().await.audit.len()
    }

    /// Clears all rows.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = State::default();
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn commit(&self, commit: Commit) -> Result<()> {
        let mut state = self.state.write().await;

        // Validate everything before touching state so a rejected commit
        // leaves no partial writes behind.
        let target = commit
            .upsert_order
            .as_ref()
            .map(|o| o.id)
            .or(commit.remove_order);

        if let (Some(order_id), Some(expected)) = (target, commit.expected_version) {
            let actual = state
                .orders
                .get(&order_id)
                .map(|o| o.version)
                .unwrap_or(Version::initial());
            if actual != expected {
                return Err(StoreError::ConcurrencyConflict {
                    order_id,
                    expected,
                    actual,
                });
            }
        }

        if let Some(order) = &commit.upsert_order
            && state
                .orders
                .values()
                .any(|o| o.id != order.id && o.number == order.number)
        {
            return Err(StoreError::DuplicateOrderNumber(order.number.clone()));
        }

        if let Some(order_id) = commit.remove_order
            && !state.orders.contains_key(&order_id)
        {
            return Err(StoreError::OrderMissing(order_id));
        }

        // Apply. Ledger appends first, then history purge, then the order
        // row itself: history rows never outlive their order within a
        // commit that removes both.
        state.audit.extend(commit.audit);
        state.history.extend(commit.history);

        if let Some(order_id) = commit.purge_history {
            state.history.retain(|e| e.order_id != order_id);
        }
        if let Some(order) = commit.upsert_order {
            state.orders.insert(order.id, order);
        }
        if let Some(order_id) = commit.remove_order {
            state.orders.remove(&order_id);
        }

        for account in commit.loyalty_accounts {
            state.loyalty.insert(account.customer_id, account);
        }
        state
            .loyalty_transactions
            .extend(commit.loyalty_transactions);

        Ok(())
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }

    async fn get_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.values().find(|o| &o.number == number).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        let mut orders: Vec<_> = state.orders.values().cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn audit_for_order(&self, order_id: OrderId) -> Result<Vec<AuditLogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .audit
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn history_for_order(&self, order_id: OrderId) -> Result<Vec<StatusHistoryEntry>> {
        let state = self.state.read().await;
        Ok(state
            .history
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn all_history(&self) -> Result<Vec<StatusHistoryEntry>> {
        Ok(self.state.read().await.history.clone())
    }

    async fn loyalty_account(&self, customer_id: CustomerId) -> Result<Option<CustomerLoyalty>> {
        Ok(self.state.read().await.loyalty.get(&customer_id).cloned())
    }

    async fn loyalty_accounts(&self) -> Result<Vec<CustomerLoyalty>> {
        Ok(self.state.read().await.loyalty.values().cloned().collect())
    }

    async fn transactions_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LoyaltyTransaction>> {
        let state = self.state.read().await;
        Ok(state
            .loyalty_transactions
            .iter()
            .filter(|t| t.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn get_customer(&self, customer_id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.state.read().await.customers.get(&customer_id).cloned())
    }

    async fn insert_customer(&self, customer: Customer) -> Result<()> {
        self.state
            .write()
            .await
            .customers
            .insert(customer.id, customer);
        Ok(())
    }

    async fn get_service(&self, service_id: ServiceId) -> Result<Option<Service>> {
        Ok(self.state.read().await.services.get(&service_id).cloned())
    }

    async fn insert_service(&self, service: Service) -> Result<()> {
        self.state
            .write()
            .await
            .services
            .insert(service.id, service);
        Ok(())
    }
}
