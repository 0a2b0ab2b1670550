//! Store change notifications
//!
//! Board views never cache copies of store data. They read snapshots and
//! subscribe to this bus to learn when to read again. The bus uses
//! `tokio::sync::broadcast`, so publishing never blocks the mutating store.
//!
//! ```text
//! OrderStore ────┐
//! CustomerStore ─┼──▶ EventBus::publish() ──▶ broadcast channel ──▶ /events (SSE)
//! AgentStore ────┘                                               ──▶ in-process listeners
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::status::OrderStatus;

/// Order mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderEvent {
    /// An order was submitted
    Created {
        order_id: Uuid,
        order_number: String,
        agent_id: Uuid,
    },
    /// An order moved along the pipeline
    StatusChanged {
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Customer mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CustomerEvent {
    Created { customer_id: Uuid, name: String },
}

/// Agent selection changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentEvent {
    Selected { agent_id: Uuid },
}

/// Top-level event that wraps every store's events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    Order(OrderEvent),
    Customer(CustomerEvent),
    Agent(AgentEvent),
}

impl StoreEvent {
    /// Which store produced the event
    pub fn event_kind(&self) -> &str {
        match self {
            StoreEvent::Order(_) => "order",
            StoreEvent::Customer(_) => "customer",
            StoreEvent::Agent(_) => "agent",
        }
    }

    /// The action name (created, status_changed, selected)
    pub fn action(&self) -> &str {
        match self {
            StoreEvent::Order(OrderEvent::Created { .. }) => "created",
            StoreEvent::Order(OrderEvent::StatusChanged { .. }) => "status_changed",
            StoreEvent::Customer(CustomerEvent::Created { .. }) => "created",
            StoreEvent::Agent(AgentEvent::Selected { .. }) => "selected",
        }
    }

    /// The id of the record the event is about
    pub fn subject_id(&self) -> Uuid {
        match self {
            StoreEvent::Order(OrderEvent::Created { order_id, .. })
            | StoreEvent::Order(OrderEvent::StatusChanged { order_id, .. }) => *order_id,
            StoreEvent::Customer(CustomerEvent::Created { customer_id, .. }) => *customer_id,
            StoreEvent::Agent(AgentEvent::Selected { agent_id }) => *agent_id,
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: StoreEvent,
}

impl EventEnvelope {
    pub fn new(event: StoreEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; every clone publishes into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind get a
    /// `Lagged` error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers that will see the event. With no
    /// subscribers the event is dropped.
    pub fn publish(&self, event: StoreEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_changed_serialization() {
        let event = StoreEvent::Order(OrderEvent::StatusChanged {
            order_id: Uuid::nil(),
            from: OrderStatus::FitCheck,
            to: OrderStatus::FinalCutting,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "order");
        assert_eq!(json["action"], "status_changed");
        assert_eq!(json["from"], "Fit Check");
        assert_eq!(json["to"], "Final Cutting");
    }

    #[test]
    fn test_event_accessors() {
        let id = Uuid::new_v4();
        let event = StoreEvent::Customer(CustomerEvent::Created {
            customer_id: id,
            name: "Riley".to_string(),
        });
        assert_eq!(event.event_kind(), "customer");
        assert_eq!(event.action(), "created");
        assert_eq!(event.subject_id(), id);
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let agent_id = Uuid::new_v4();
        let receivers = bus.publish(StoreEvent::Agent(AgentEvent::Selected { agent_id }));
        assert_eq!(receivers, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event.subject_id(), agent_id);
        assert_eq!(received.event.action(), "selected");
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::new(16);
        let receivers = bus.publish(StoreEvent::Agent(AgentEvent::Selected {
            agent_id: Uuid::new_v4(),
        }));
        assert_eq!(receivers, 0);
    }

    #[test]
    fn test_event_bus_clone_shares_channel() {
        let bus = EventBus::default();
        let _rx = bus.subscribe();
        let bus2 = bus.clone();
        assert_eq!(bus2.receiver_count(), 1);
    }
}
