//! Order lifecycle controller.

use chrono::Utc;

use common::{
    AuditLogEntry, CustomerLoyalty, LoyaltyProgram, Order, OrderId, Service, StatusHistoryEntry,
};
use store::{Commit, Store, StoreError};

use crate::error::{DomainError, Result};
use crate::loyalty::engine;
use crate::pricing::{self, PriceQuote};

use super::{CreateOrder, DeleteOrder, EditOrder, OrderNotice, ServiceRef, TransitionStatus};

/// Result of taking in a new order.
#[derive(Debug)]
pub struct CreateOutcome {
    /// The persisted order.
    pub order: Order,

    /// Event for the external notifier.
    pub notice: OrderNotice,

    /// The computed price and where it came from. An `Unknown` source
    /// means the order went through at zero and the operator should be
    /// warned.
    pub price: PriceQuote,
}

/// Result of an edit.
#[derive(Debug)]
pub struct EditOutcome {
    /// The order after the edit.
    pub order: Order,

    /// Names of the tracked fields that actually changed. Empty for a
    /// no-op edit, which writes nothing.
    pub changed_fields: Vec<&'static str>,

    /// The recomputed price, present only when a price-relevant field
    /// changed.
    pub price: Option<PriceQuote>,
}

/// Result of a status transition.
#[derive(Debug)]
pub struct TransitionOutcome {
    /// The order after the call.
    pub order: Order,

    /// False when the requested status equalled the current one and the
    /// call was an idempotent no-op.
    pub applied: bool,

    /// Event for the external notifier. None for a no-op.
    pub notice: Option<OrderNotice>,

    /// Points accrued when the transition completed the order.
    pub points_awarded: Option<i64>,
}

/// Service for managing the order lifecycle.
///
/// Orchestrates the pricing calculator, both ledgers, and the rewards
/// engine: every accepted mutation lands in the store as one atomic
/// commit, serialized per order by the row version check.
pub struct OrderService<S: Store> {
    store: S,
}

impl<S: Store> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Takes in a new order.
    ///
    /// Verifies the customer, resolves the service, prices the job, and
    /// persists the order together with its `Created` audit entry and the
    /// `None -> Received` history entry.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, cmd: CreateOrder) -> Result<CreateOutcome> {
        self.store
            .get_customer(cmd.customer_id)
            .await?
            .ok_or(DomainError::CustomerNotFound(cmd.customer_id))?;

        let (service, service_name) = match &cmd.service {
            ServiceRef::Id(id) => {
                let service = self
                    .store
                    .get_service(*id)
                    .await?
                    .ok_or(DomainError::ServiceNotFound(*id))?;
                let name = service.name.clone();
                (Some(service), Some(name))
            }
            ServiceRef::Name(name) => (None, Some(name.clone())),
        };

        let price = pricing::quote(service.as_ref(), service_name.as_deref(), cmd.weight_kg);
        if !price.is_known() {
            tracing::warn!(
                customer = %cmd.customer_id,
                service = service_name.as_deref().unwrap_or(""),
                "price unknown, order proceeds at zero"
            );
        }

        let order = Order::received(
            cmd.customer_id,
            service.map(|s| s.id),
            service_name,
            cmd.item_count,
            cmd.weight_kg,
            price.amount,
            cmd.notes,
        );

        let mut created = AuditLogEntry::created(order.id, cmd.actor);
        if let Some(origin) = &cmd.origin {
            created = created.with_origin(origin.clone());
        }

        self.store
            .commit(
                Commit::new()
                    .order(order.clone())
                    .expect_new()
                    .audit(created)
                    .history(StatusHistoryEntry::new(
                        order.id,
                        None,
                        order.status,
                        cmd.actor,
                        None,
                    )),
            )
            .await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order = %order.number, price = %price.amount, "order received");

        let notice = OrderNotice {
            order_id: order.id,
            order_number: order.number.clone(),
            customer_id: order.customer_id,
            new_status: order.status,
            actor: cmd.actor,
        };

        Ok(CreateOutcome {
            order,
            notice,
            price,
        })
    }

    /// Applies an edit to an order.
    ///
    /// Each tracked field is compared old against new; only fields that
    /// actually changed produce an audit entry. The price is recomputed
    /// when service, item count, or weight changed. Submitting only
    /// current values writes nothing and leaves the edit counter alone.
    #[tracing::instrument(skip(self))]
    pub async fn edit(&self, cmd: EditOrder) -> Result<EditOutcome> {
        let mut order = self.require_order(cmd.order_id).await?;
        let prior_version = order.version;

        let mut audit: Vec<AuditLogEntry> = Vec::new();
        let mut changed: Vec<&'static str> = Vec::new();
        let mut price_relevant = false;
        // The resolved service snapshot when this edit changes it; saves
        // a second fetch at pricing time.
        let mut new_service: Option<Service> = None;

        if let Some(count) = cmd.edit.item_count
            && count != order.item_count
        {
            audit.push(AuditLogEntry::edited(
                order.id,
                "item_count",
                order.item_count.to_string(),
                count.to_string(),
                cmd.actor,
            ));
            order.item_count = count;
            changed.push("item_count");
            price_relevant = true;
        }

        if let Some(service_id) = cmd.edit.service_id
            && Some(service_id) != order.service_id
        {
            let service = self
                .store
                .get_service(service_id)
                .await?
                .ok_or(DomainError::ServiceNotFound(service_id))?;
            audit.push(AuditLogEntry::edited(
                order.id,
                "service",
                order.service_name.clone().unwrap_or_default(),
                service.name.clone(),
                cmd.actor,
            ));
            order.service_id = Some(service_id);
            order.service_name = Some(service.name.clone());
            new_service = Some(service);
            changed.push("service");
            price_relevant = true;
        }

        // Exact comparison on purpose: re-submitting the stored value is
        // a no-op, any other value is a change.
        if let Some(weight) = cmd.edit.weight_kg
            && weight != order.weight_kg
        {
            audit.push(AuditLogEntry::edited(
                order.id,
                "weight_kg",
                order.weight_kg.to_string(),
                weight.to_string(),
                cmd.actor,
            ));
            order.weight_kg = weight;
            changed.push("weight_kg");
            price_relevant = true;
        }

        if let Some(notes) = &cmd.edit.notes
            && *notes != order.notes
        {
            audit.push(AuditLogEntry::edited(
                order.id,
                "notes",
                order.notes.clone(),
                notes.clone(),
                cmd.actor,
            ));
            order.notes = notes.clone();
            changed.push("notes");
        }

        if let Some(customer_id) = cmd.edit.customer_id
            && customer_id != order.customer_id
        {
            self.store
                .get_customer(customer_id)
                .await?
                .ok_or(DomainError::CustomerNotFound(customer_id))?;
            audit.push(AuditLogEntry::edited(
                order.id,
                "customer",
                order.customer_id.to_string(),
                customer_id.to_string(),
                cmd.actor,
            ));
            order.customer_id = customer_id;
            changed.push("customer");
        }

        if changed.is_empty() {
            tracing::debug!(order = %order.number, "no-op edit, nothing written");
            return Ok(EditOutcome {
                order,
                changed_fields: changed,
                price: None,
            });
        }

        let price = if price_relevant {
            let service = match (&new_service, order.service_id) {
                (Some(s), _) => Some(s.clone()),
                (None, Some(id)) => self.store.get_service(id).await?,
                (None, None) => None,
            };
            let quote =
                pricing::quote(service.as_ref(), order.service_name.as_deref(), order.weight_kg);
            order.price = quote.amount;
            Some(quote)
        } else {
            None
        };

        if let Some(origin) = &cmd.origin {
            for entry in &mut audit {
                entry.origin = Some(origin.clone());
            }
        }

        order.record_mutation(cmd.actor, Utc::now());

        let mut commit = Commit::new().order(order.clone()).expect_version(prior_version);
        for entry in audit {
            commit = commit.audit(entry);
        }
        self.store.commit(commit).await?;

        tracing::info!(order = %order.number, fields = ?changed, "order edited");

        Ok(EditOutcome {
            order,
            changed_fields: changed,
            price,
        })
    }

    /// Moves an order to a new status.
    ///
    /// A request for the current status is an idempotent no-op: zero
    /// ledger writes, success. A real transition must move forward; it
    /// writes one audit entry and one history entry, and entering a
    /// terminal status accrues loyalty points in the same commit, so the
    /// award happens exactly once even under concurrent requests.
    #[tracing::instrument(skip(self, program))]
    pub async fn transition_status(
        &self,
        cmd: TransitionStatus,
        program: &LoyaltyProgram,
    ) -> Result<TransitionOutcome> {
        let mut order = self.require_order(cmd.order_id).await?;
        let from = order.status;

        if cmd.status == from {
            tracing::debug!(order = %order.number, status = %from, "no-op transition");
            return Ok(TransitionOutcome {
                order,
                applied: false,
                notice: None,
                points_awarded: None,
            });
        }

        if !from.can_advance_to(cmd.status) {
            return Err(DomainError::InvalidTransition {
                from,
                to: cmd.status,
            });
        }

        let prior_version = order.version;
        order.status = cmd.status;
        order.record_mutation(cmd.actor, Utc::now());

        let mut status_audit =
            AuditLogEntry::status_changed(order.id, from, cmd.status, cmd.actor);
        if let Some(origin) = &cmd.origin {
            status_audit = status_audit.with_origin(origin.clone());
        }

        let mut commit = Commit::new()
            .order(order.clone())
            .expect_version(prior_version)
            .audit(status_audit)
            .history(StatusHistoryEntry::new(
                order.id,
                Some(from),
                cmd.status,
                cmd.actor,
                cmd.note.clone(),
            ));

        let mut points_awarded = None;
        if cmd.status.is_terminal() {
            let account = self
                .store
                .loyalty_account(order.customer_id)
                .await?
                .unwrap_or_else(|| CustomerLoyalty::new(order.customer_id));
            let update = engine::accrue(&account, program, &order);
            points_awarded = Some(update.transaction.delta);
            commit = commit.loyalty(update.account, update.transaction);
        }

        match self.store.commit(commit).await {
            Ok(()) => {}
            Err(StoreError::ConcurrencyConflict { .. }) => {
                // A concurrent transition won the race. If it applied the
                // same target status, this call degrades to the no-op it
                // would have been a moment later; the winner's commit
                // already carried the single award.
                let current = self.require_order(cmd.order_id).await?;
                if current.status == cmd.status {
                    tracing::debug!(
                        order = %current.number,
                        status = %cmd.status,
                        "lost race to an identical transition"
                    );
                    return Ok(TransitionOutcome {
                        order: current,
                        applied: false,
                        notice: None,
                        points_awarded: None,
                    });
                }
                return Err(StoreError::ConcurrencyConflict {
                    order_id: cmd.order_id,
                    expected: prior_version,
                    actual: current.version,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(points) = points_awarded {
            metrics::counter!("orders_completed_total").increment(1);
            metrics::counter!("loyalty_points_awarded_total").increment(points.max(0) as u64);
        }
        tracing::info!(order = %order.number, from = %from, to = %cmd.status, "status changed");

        let notice = OrderNotice {
            order_id: order.id,
            order_number: order.number.clone(),
            customer_id: order.customer_id,
            new_status: cmd.status,
            actor: cmd.actor,
        };

        Ok(TransitionOutcome {
            order,
            applied: true,
            notice: Some(notice),
            points_awarded,
        })
    }

    /// Deletes an order.
    ///
    /// Without the capability flag the attempt itself is recorded as a
    /// `DeleteForbidden` audit entry and rejected. A permitted delete
    /// writes the `Deleted` audit entry, purges the status-history rows,
    /// and removes the order; audit entries outlive the order.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, cmd: DeleteOrder) -> Result<()> {
        let order = self.require_order(cmd.order_id).await?;

        if !cmd.can_delete {
            let mut entry = AuditLogEntry::delete_forbidden(order.id, cmd.actor);
            if let Some(origin) = &cmd.origin {
                entry = entry.with_origin(origin.clone());
            }
            self.store.commit(Commit::new().audit(entry)).await?;
            tracing::warn!(order = %order.number, actor = %cmd.actor, "delete forbidden");
            return Err(DomainError::Forbidden);
        }

        let mut entry = AuditLogEntry::deleted(order.id, cmd.actor);
        if let Some(origin) = &cmd.origin {
            entry = entry.with_origin(origin.clone());
        }

        self.store
            .commit(
                Commit::new()
                    .audit(entry)
                    .purge_history(order.id)
                    .remove_order(order.id)
                    .expect_version(order.version),
            )
            .await?;

        tracing::info!(order = %order.number, "order deleted");
        Ok(())
    }

    /// Loads an order by ID.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.store.get_order(order_id).await?)
    }

    async fn require_order(&self, order_id: OrderId) -> Result<Order> {
        self.store
            .get_order(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(order_id))
    }
}
