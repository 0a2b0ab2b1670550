//! Entity trait shared by orders, customers and agents

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all records owned by a store.
///
/// Every record has:
/// - id: Unique identifier, generated once and never changed
/// - created_at: Creation timestamp (seed records use the boot time)
///
/// The resource name labels the store in lock and not-found errors.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "orders", "customers")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the creation timestamp, when the record tracks one
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}
