//! Core module containing the domain types, pipeline and service traits

pub mod agent;
pub mod attachment;
pub mod customer;
pub mod entity;
pub mod error;
pub mod events;
pub mod fabric;
pub mod order;
pub mod service;
pub mod status;
pub mod validation;

pub use agent::Agent;
pub use attachment::Attachment;
pub use customer::{Customer, NewCustomer};
pub use entity::Entity;
pub use error::{SuitcutError, SuitcutResult};
pub use events::{EventBus, EventEnvelope, StoreEvent};
pub use fabric::fabric_total;
pub use order::{Order, OrderFormValues, OrderLine};
pub use service::{AgentService, CustomerService, OrderService, StatusCounts};
pub use status::{OrderStatus, StatusTone, Transition, TransitionKind};
