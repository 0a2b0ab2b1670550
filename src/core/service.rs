//! Service traits for the three stores
//!
//! Each entity type has exactly one owning store. Consumers receive these
//! traits as `Arc<dyn …>` handles through [`AppContext`](crate::server::AppContext)
//! instead of reaching for ambient state.

use async_trait::async_trait;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::core::agent::Agent;
use crate::core::attachment::Attachment;
use crate::core::customer::{Customer, NewCustomer};
use crate::core::error::SuitcutResult;
use crate::core::order::{Order, OrderFormValues};
use crate::core::status::{OrderStatus, TransitionKind};

/// Per-stage order counts, in pipeline order, zero-filled
pub type StatusCounts = IndexMap<OrderStatus, usize>;

/// Service trait for the order store
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order from submitted intake values
    ///
    /// The new order starts in the first stage and is placed at the front
    /// of the list.
    async fn create(
        &self,
        values: OrderFormValues,
        attachment: Option<Attachment>,
    ) -> SuitcutResult<Order>;

    /// Get an order by ID
    async fn get(&self, id: &Uuid) -> SuitcutResult<Option<Order>>;

    /// List orders, most recent first, optionally only those in one stage
    async fn list(&self, status: Option<OrderStatus>) -> SuitcutResult<Vec<Order>>;

    /// Move an order to `status`
    ///
    /// Only the transitions offered from the current stage are accepted;
    /// anything else fails with `TransitionError::NotAllowed` and leaves the
    /// order untouched. Returns `Ok(None)` when no order has this id.
    async fn set_status(&self, id: &Uuid, status: OrderStatus) -> SuitcutResult<Option<Order>>;

    /// Apply the advance or regress transition offered from the current stage
    async fn apply(&self, id: &Uuid, kind: TransitionKind) -> SuitcutResult<Option<Order>>;

    /// Count orders per stage
    async fn aggregate_counts(&self) -> SuitcutResult<StatusCounts>;
}

/// Service trait for the customer store
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Add a customer and return the created record
    ///
    /// The store does not validate the payload; callers check the name.
    async fn add(&self, customer: NewCustomer) -> SuitcutResult<Customer>;

    /// Get a customer by ID
    async fn get(&self, id: &Uuid) -> SuitcutResult<Option<Customer>>;

    /// List customers, most recent first
    async fn list(&self) -> SuitcutResult<Vec<Customer>>;
}

/// Service trait for the agent roster and the current selection
#[async_trait]
pub trait AgentService: Send + Sync {
    /// The fixed roster
    async fn list(&self) -> SuitcutResult<Vec<Agent>>;

    /// Get an agent by ID
    async fn get(&self, id: &Uuid) -> SuitcutResult<Option<Agent>>;

    /// The currently selected agent
    async fn selected(&self) -> SuitcutResult<Agent>;

    /// Point the selection at another agent of the roster
    async fn select(&self, id: &Uuid) -> SuitcutResult<Agent>;
}

/// Count orders per stage, returning every stage in pipeline order
pub fn count_by_status<'a>(orders: impl IntoIterator<Item = &'a Order>) -> StatusCounts {
    let mut counts: StatusCounts = OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for order in orders {
        if let Some(count) = counts.get_mut(&order.status()) {
            *count += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_status_is_zero_filled_and_ordered() {
        let counts = count_by_status(std::iter::empty());
        assert_eq!(counts.len(), 16);
        assert!(counts.values().all(|c| *c == 0));
        let keys: Vec<OrderStatus> = counts.keys().copied().collect();
        assert_eq!(keys, OrderStatus::ALL.to_vec());
    }

    #[test]
    fn test_count_by_status_counts() {
        let orders = vec![
            Order::create(OrderFormValues::default(), None),
            Order::create(OrderFormValues::default(), None),
        ];
        let counts = count_by_status(&orders);
        assert_eq!(counts[&OrderStatus::IntakeIdCard], 2);
        assert_eq!(counts.values().sum::<usize>(), 2);
    }
}
