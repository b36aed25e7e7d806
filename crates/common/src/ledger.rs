//! The two append-only ledgers attached to an order.
//!
//! The audit log is the compliance trail: field-level change records with
//! free-text old/new values. The status history is the analytics trail:
//! status transitions with timestamps that drive all time-series
//! reporting. They are written at the same call sites but stay separate;
//! they have different consumers and different lifetimes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, OrderStatus, StaffId};

/// What an audit log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    /// Order was created.
    Created,

    /// A tracked field was edited.
    Edited,

    /// Status moved to a new value.
    StatusChanged,

    /// Order was deleted.
    Deleted,

    /// A delete was attempted without the required capability.
    DeleteForbidden,
}

impl AuditAction {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "Created",
            AuditAction::Edited => "Edited",
            AuditAction::StatusChanged => "StatusChanged",
            AuditAction::Deleted => "Deleted",
            AuditAction::DeleteForbidden => "DeleteForbidden",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only field-level change record for an order.
///
/// Never mutated or deleted after being written; audit rows outlive the
/// order they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// The order this entry belongs to.
    pub order_id: OrderId,

    /// What happened.
    pub action: AuditAction,

    /// Name of the changed field, for `Edited` and `StatusChanged`.
    pub field: Option<String>,

    /// Value before the change, rendered as text.
    pub old_value: Option<String>,

    /// Value after the change, rendered as text.
    pub new_value: Option<String>,

    /// Who made the change.
    pub actor: StaffId,

    /// When the entry was written.
    pub at: DateTime<Utc>,

    /// Network origin of the request, when the caller supplies one.
    pub origin: Option<String>,
}

impl AuditLogEntry {
    /// Creates a `Created` entry.
    pub fn created(order_id: OrderId, actor: StaffId) -> Self {
        Self::bare(order_id, AuditAction::Created, actor)
    }

    /// Creates an `Edited` entry for one tracked field.
    pub fn edited(
        order_id: OrderId,
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        actor: StaffId,
    ) -> Self {
        Self {
            field: Some(field.into()),
            old_value: Some(old_value.into()),
            new_value: Some(new_value.into()),
            ..Self::bare(order_id, AuditAction::Edited, actor)
        }
    }

    /// Creates a `StatusChanged` entry.
    pub fn status_changed(
        order_id: OrderId,
        old: OrderStatus,
        new: OrderStatus,
        actor: StaffId,
    ) -> Self {
        Self {
            field: Some("status".to_string()),
            old_value: Some(old.as_str().to_string()),
            new_value: Some(new.as_str().to_string()),
            ..Self::bare(order_id, AuditAction::StatusChanged, actor)
        }
    }

    /// Creates a `Deleted` entry.
    pub fn deleted(order_id: OrderId, actor: StaffId) -> Self {
        Self::bare(order_id, AuditAction::Deleted, actor)
    }

    /// Creates a `DeleteForbidden` entry.
    pub fn delete_forbidden(order_id: OrderId, actor: StaffId) -> Self {
        Self::bare(order_id, AuditAction::DeleteForbidden, actor)
    }

    /// Attaches a network origin to the entry.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    fn bare(order_id: OrderId, action: AuditAction, actor: StaffId) -> Self {
        Self {
            order_id,
            action,
            field: None,
            old_value: None,
            new_value: None,
            actor,
            at: Utc::now(),
            origin: None,
        }
    }
}

/// Append-only status transition record for an order.
///
/// Written only when the new status differs from the previous one; a
/// no-op transition never produces an entry. This ledger's timestamps are
/// the source of truth for revenue-by-day reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    /// The order this entry belongs to.
    pub order_id: OrderId,

    /// Previous status. None only for the creation entry.
    pub from: Option<OrderStatus>,

    /// New status.
    pub to: OrderStatus,

    /// Who triggered the transition.
    pub actor: StaffId,

    /// When the transition happened.
    pub at: DateTime<Utc>,

    /// Optional operator note.
    pub note: Option<String>,
}

impl StatusHistoryEntry {
    /// Creates a transition entry.
    pub fn new(
        order_id: OrderId,
        from: Option<OrderStatus>,
        to: OrderStatus,
        actor: StaffId,
        note: Option<String>,
    ) -> Self {
        Self {
            order_id,
            from,
            to,
            actor,
            at: Utc::now(),
            note,
        }
    }

    /// Returns true if this entry records the order reaching a terminal
    /// state for the first time.
    pub fn is_completion(&self) -> bool {
        self.to.is_terminal() && !self.from.is_some_and(|s| s.is_terminal())
    }
}
