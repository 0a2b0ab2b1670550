//! In-memory implementations of the store services
//!
//! All state is volatile. Each store is a cheap `Clone` handle around a
//! shared `RwLock`, so one instance can be handed to every consumer.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::core::agent::Agent;
use crate::core::attachment::Attachment;
use crate::core::customer::{Customer, NewCustomer};
use crate::core::entity::Entity;
use crate::core::error::{AgentError, ConfigError, StorageError, SuitcutResult, TransitionError};
use crate::core::events::{AgentEvent, CustomerEvent, EventBus, OrderEvent, StoreEvent};
use crate::core::order::{Order, OrderFormValues};
use crate::core::service::{
    AgentService, CustomerService, OrderService, StatusCounts, count_by_status,
};
use crate::core::status::{OrderStatus, TransitionKind};
use crate::storage::seed;

fn read_lock<'a, T>(lock: &'a RwLock<T>, store: &str) -> SuitcutResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| {
        StorageError::LockPoisoned {
            store: store.to_string(),
        }
        .into()
    })
}

fn write_lock<'a, T>(lock: &'a RwLock<T>, store: &str) -> SuitcutResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| {
        StorageError::LockPoisoned {
            store: store.to_string(),
        }
        .into()
    })
}

// =============================================================================
// Orders
// =============================================================================

/// In-memory order store
///
/// Orders are kept most-recent-first. Status changes are checked against
/// the pipeline's transition table inside the write lock.
#[derive(Clone, Default)]
pub struct InMemoryOrderService {
    orders: Arc<RwLock<Vec<Order>>>,
    events: Option<EventBus>,
}

impl InMemoryOrderService {
    /// Create an empty order store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an order store holding the seed orders
    pub fn seeded() -> Self {
        Self::with_orders(seed::orders())
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
            events: None,
        }
    }

    /// Publish mutations on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    fn publish(&self, event: OrderEvent) {
        if let Some(bus) = &self.events {
            bus.publish(StoreEvent::Order(event));
        }
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create(
        &self,
        values: OrderFormValues,
        attachment: Option<Attachment>,
    ) -> SuitcutResult<Order> {
        let order = Order::create(values, attachment);
        {
            let mut orders = write_lock(&self.orders, Order::resource_name())?;
            orders.insert(0, order.clone());
        }

        tracing::info!(
            order_id = %order.id(),
            order_number = %order.sheet.order_number,
            "order created"
        );
        self.publish(OrderEvent::Created {
            order_id: order.id(),
            order_number: order.sheet.order_number.clone(),
            agent_id: order.agent_id(),
        });
        Ok(order)
    }

    async fn get(&self, id: &Uuid) -> SuitcutResult<Option<Order>> {
        let orders = read_lock(&self.orders, Order::resource_name())?;
        Ok(orders.iter().find(|o| &o.id() == id).cloned())
    }

    async fn list(&self, status: Option<OrderStatus>) -> SuitcutResult<Vec<Order>> {
        let orders = read_lock(&self.orders, Order::resource_name())?;
        Ok(orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status() == s))
            .cloned()
            .collect())
    }

    async fn set_status(&self, id: &Uuid, status: OrderStatus) -> SuitcutResult<Option<Order>> {
        let (updated, from) = {
            let mut orders = write_lock(&self.orders, Order::resource_name())?;
            let Some(order) = orders.iter_mut().find(|o| &o.id() == id) else {
                tracing::debug!(order_id = %id, "status change for unknown order ignored");
                return Ok(None);
            };

            let from = order.status();
            if from.transition_to(status).is_none() {
                tracing::warn!(order_id = %id, %from, to = %status, "transition rejected");
                return Err(TransitionError::NotAllowed {
                    order_id: *id,
                    from,
                    to: status,
                }
                .into());
            }

            order.set_status(status);
            (order.clone(), from)
        };

        tracing::info!(order_id = %id, %from, to = %status, "order status changed");
        self.publish(OrderEvent::StatusChanged {
            order_id: *id,
            from,
            to: status,
        });
        Ok(Some(updated))
    }

    async fn apply(&self, id: &Uuid, kind: TransitionKind) -> SuitcutResult<Option<Order>> {
        let Some(current) = self.get(id).await?.map(|o| o.status()) else {
            return Ok(None);
        };

        let target = match kind {
            TransitionKind::Advance => current.next(),
            TransitionKind::Regress => current.regression(),
        };
        match target {
            Some(to) => self.set_status(id, to).await,
            // Nothing offered in this direction; report it as an illegal move
            // onto the current stage.
            None => Err(TransitionError::NotAllowed {
                order_id: *id,
                from: current,
                to: current,
            }
            .into()),
        }
    }

    async fn aggregate_counts(&self) -> SuitcutResult<StatusCounts> {
        let orders = read_lock(&self.orders, Order::resource_name())?;
        Ok(count_by_status(orders.iter()))
    }
}

// =============================================================================
// Customers
// =============================================================================

/// In-memory customer store, most-recent-first
#[derive(Clone, Default)]
pub struct InMemoryCustomerService {
    customers: Arc<RwLock<Vec<Customer>>>,
    events: Option<EventBus>,
}

impl InMemoryCustomerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a customer store holding the seed customers
    pub fn seeded() -> Self {
        Self::with_customers(seed::customers())
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: Arc::new(RwLock::new(customers)),
            events: None,
        }
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }
}

#[async_trait]
impl CustomerService for InMemoryCustomerService {
    async fn add(&self, customer: NewCustomer) -> SuitcutResult<Customer> {
        let created = customer.into_customer();
        {
            let mut customers = write_lock(&self.customers, Customer::resource_name())?;
            customers.insert(0, created.clone());
        }

        tracing::info!(customer_id = %created.id, "customer added");
        if let Some(bus) = &self.events {
            bus.publish(StoreEvent::Customer(CustomerEvent::Created {
                customer_id: created.id,
                name: created.name.clone(),
            }));
        }
        Ok(created)
    }

    async fn get(&self, id: &Uuid) -> SuitcutResult<Option<Customer>> {
        let customers = read_lock(&self.customers, Customer::resource_name())?;
        Ok(customers.iter().find(|c| &c.id == id).cloned())
    }

    async fn list(&self) -> SuitcutResult<Vec<Customer>> {
        let customers = read_lock(&self.customers, Customer::resource_name())?;
        Ok(customers.clone())
    }
}

// =============================================================================
// Agents
// =============================================================================

/// Static agent roster with a single selection pointer
#[derive(Clone)]
pub struct InMemoryAgentService {
    roster: Arc<Vec<Agent>>,
    selected: Arc<RwLock<Uuid>>,
    events: Option<EventBus>,
}

impl InMemoryAgentService {
    /// Create a roster; the first agent starts selected
    pub fn new(roster: Vec<Agent>) -> SuitcutResult<Self> {
        let first = roster.first().ok_or_else(|| ConfigError::InvalidValue {
            field: "agents".to_string(),
            value: "[]".to_string(),
            message: "the roster needs at least one agent".to_string(),
        })?;
        let selected = first.id;

        Ok(Self {
            roster: Arc::new(roster),
            selected: Arc::new(RwLock::new(selected)),
            events: None,
        })
    }

    /// The seed roster
    pub fn seeded() -> Self {
        let roster = seed::agents();
        let selected = roster[0].id;
        Self {
            roster: Arc::new(roster),
            selected: Arc::new(RwLock::new(selected)),
            events: None,
        }
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    fn find(&self, id: &Uuid) -> Option<&Agent> {
        self.roster.iter().find(|a| &a.id == id)
    }
}

#[async_trait]
impl AgentService for InMemoryAgentService {
    async fn list(&self) -> SuitcutResult<Vec<Agent>> {
        Ok(self.roster.as_ref().clone())
    }

    async fn get(&self, id: &Uuid) -> SuitcutResult<Option<Agent>> {
        Ok(self.find(id).cloned())
    }

    async fn selected(&self) -> SuitcutResult<Agent> {
        let selected = *read_lock(&self.selected, Agent::resource_name())?;
        // The roster is never empty, so falling back to the first agent
        // always succeeds.
        self.find(&selected)
            .or_else(|| self.roster.first())
            .cloned()
            .ok_or_else(|| {
                StorageError::Unavailable {
                    store: Agent::resource_name().to_string(),
                }
                .into()
            })
    }

    async fn select(&self, id: &Uuid) -> SuitcutResult<Agent> {
        let agent = self
            .find(id)
            .cloned()
            .ok_or(AgentError::NotFound { id: *id })?;
        {
            let mut selected = write_lock(&self.selected, Agent::resource_name())?;
            *selected = agent.id;
        }

        tracing::info!(agent_id = %agent.id, shop = %agent.shop, "agent selected");
        if let Some(bus) = &self.events {
            bus.publish(StoreEvent::Agent(AgentEvent::Selected { agent_id: agent.id }));
        }
        Ok(agent)
    }
}
