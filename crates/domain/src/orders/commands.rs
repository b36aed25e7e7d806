//! Order commands.

use common::{CustomerId, OrderId, OrderStatus, ServiceId, StaffId};

use super::OrderEdit;

/// Reference to the service an order is for.
///
/// Legacy intake forms submit a free-text name instead of a catalog id;
/// both are accepted and the name is kept as a pricing fallback.
#[derive(Debug, Clone)]
pub enum ServiceRef {
    /// A catalog service id. Must resolve.
    Id(ServiceId),

    /// A legacy free-text service name.
    Name(String),
}

/// Command to take in a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The customer the job belongs to.
    pub customer_id: CustomerId,

    /// The requested service.
    pub service: ServiceRef,

    /// Number of garments/items.
    pub item_count: u32,

    /// Weight in kilograms.
    pub weight_kg: f64,

    /// Free-text notes.
    pub notes: String,

    /// Who is taking the order in.
    pub actor: StaffId,

    /// Network origin for the audit trail, when known.
    pub origin: Option<String>,
}

impl CreateOrder {
    /// Creates a command with empty notes and no origin.
    pub fn new(
        customer_id: CustomerId,
        service: ServiceRef,
        item_count: u32,
        weight_kg: f64,
        actor: StaffId,
    ) -> Self {
        Self {
            customer_id,
            service,
            item_count,
            weight_kg,
            notes: String::new(),
            actor,
            origin: None,
        }
    }
}

/// Command to apply an edit to an order.
#[derive(Debug, Clone)]
pub struct EditOrder {
    /// The order to edit.
    pub order_id: OrderId,

    /// The submitted field values.
    pub edit: OrderEdit,

    /// Who is editing.
    pub actor: StaffId,

    /// Network origin for the audit trail, when known.
    pub origin: Option<String>,
}

impl EditOrder {
    /// Creates an edit command without an origin.
    pub fn new(order_id: OrderId, edit: OrderEdit, actor: StaffId) -> Self {
        Self {
            order_id,
            edit,
            actor,
            origin: None,
        }
    }
}

/// Command to move an order to a new status.
#[derive(Debug, Clone)]
pub struct TransitionStatus {
    /// The order to transition.
    pub order_id: OrderId,

    /// The requested status.
    pub status: OrderStatus,

    /// Who is transitioning.
    pub actor: StaffId,

    /// Optional operator note for the status history.
    pub note: Option<String>,

    /// Network origin for the audit trail, when known.
    pub origin: Option<String>,
}

impl TransitionStatus {
    /// Creates a transition command without a note or origin.
    pub fn new(order_id: OrderId, status: OrderStatus, actor: StaffId) -> Self {
        Self {
            order_id,
            status,
            actor,
            note: None,
            origin: None,
        }
    }

    /// Attaches an operator note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Command to delete an order.
///
/// Authorization is decided outside the core; the capability flag carries
/// the decision in.
#[derive(Debug, Clone)]
pub struct DeleteOrder {
    /// The order to delete.
    pub order_id: OrderId,

    /// Who is deleting.
    pub actor: StaffId,

    /// Whether the actor holds administrator-equivalent privilege.
    pub can_delete: bool,

    /// Network origin for the audit trail, when known.
    pub origin: Option<String>,
}

impl DeleteOrder {
    /// Creates a delete command without an origin.
    pub fn new(order_id: OrderId, actor: StaffId, can_delete: bool) -> Self {
        Self {
            order_id,
            actor,
            can_delete,
            origin: None,
        }
    }
}
