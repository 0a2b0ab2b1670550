//! Store implementations
//!
//! Only volatile in-memory stores exist; every process starts from the
//! records in [`seed`].

pub mod in_memory;
pub mod seed;

pub use in_memory::{InMemoryAgentService, InMemoryCustomerService, InMemoryOrderService};
