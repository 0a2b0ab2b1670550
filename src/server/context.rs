//! Application context shared by every handler
//!
//! `AppContext` holds one handle per store plus the collaborators handlers
//! need. It is built explicitly with [`AppContextBuilder`]; a missing store
//! is a wiring defect and fails the build.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::error::{ConfigError, SuitcutResult};
use crate::core::events::EventBus;
use crate::core::service::{AgentService, CustomerService, OrderService};
use crate::intake::ocr::{ImageTextExtractor, SimulatedOcr};
use crate::offline::{AssetCache, AssetSource, CacheStorage, StaticAssetSource};
use crate::storage::{InMemoryAgentService, InMemoryCustomerService, InMemoryOrderService};

/// Offline cache plus the source it falls back to
#[derive(Clone)]
pub struct OfflineAssets {
    pub cache: AssetCache,
    pub source: Arc<dyn AssetSource>,
}

/// Handles to every store and collaborator
#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrderService>,
    pub customers: Arc<dyn CustomerService>,
    pub agents: Arc<dyn AgentService>,
    pub ocr: Arc<dyn ImageTextExtractor>,
    pub events: EventBus,
    pub assets: Option<OfflineAssets>,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    /// Wire in-memory stores according to `config`
    ///
    /// With seeding disabled the order and customer stores start empty; the
    /// agent roster is always the fixed one. When the offline cache is
    /// enabled it is installed and activated before this returns.
    pub async fn from_config(config: &AppConfig) -> SuitcutResult<Self> {
        let events = EventBus::new(config.events.capacity);

        let (orders, customers) = if config.seed.enabled {
            (
                InMemoryOrderService::seeded(),
                InMemoryCustomerService::seeded(),
            )
        } else {
            (InMemoryOrderService::new(), InMemoryCustomerService::new())
        };

        let agents = InMemoryAgentService::seeded();

        let mut builder = AppContextBuilder::new()
            .with_orders(orders.with_event_bus(events.clone()))
            .with_customers(customers.with_event_bus(events.clone()))
            .with_agents(agents.with_event_bus(events.clone()))
            .with_event_bus(events);

        if config.offline.enabled {
            let cache = AssetCache::new(
                CacheStorage::new(),
                config.offline.cache_name.clone(),
                config.offline.assets.clone(),
            );
            let source = StaticAssetSource::shell();
            cache
                .install(&source)
                .await
                .map_err(|e| ConfigError::InvalidValue {
                    field: "offline.assets".to_string(),
                    value: config.offline.assets.join(","),
                    message: e.to_string(),
                })?;
            cache.activate().map_err(|e| ConfigError::InvalidValue {
                field: "offline.cache_name".to_string(),
                value: config.offline.cache_name.clone(),
                message: e.to_string(),
            })?;
            builder = builder.with_offline(cache, source);
        }

        builder.build()
    }
}

/// Builder for [`AppContext`]
///
/// # Example
///
/// ```ignore
/// let ctx = AppContext::builder()
///     .with_orders(InMemoryOrderService::new())
///     .with_customers(InMemoryCustomerService::new())
///     .with_agents(InMemoryAgentService::seeded())
///     .build()?;
/// ```
#[derive(Default)]
pub struct AppContextBuilder {
    orders: Option<Arc<dyn OrderService>>,
    customers: Option<Arc<dyn CustomerService>>,
    agents: Option<Arc<dyn AgentService>>,
    ocr: Option<Arc<dyn ImageTextExtractor>>,
    events: Option<EventBus>,
    assets: Option<OfflineAssets>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order store (required)
    pub fn with_orders(mut self, service: impl OrderService + 'static) -> Self {
        self.orders = Some(Arc::new(service));
        self
    }

    /// Set the customer store (required)
    pub fn with_customers(mut self, service: impl CustomerService + 'static) -> Self {
        self.customers = Some(Arc::new(service));
        self
    }

    /// Set the agent roster (required)
    pub fn with_agents(mut self, service: impl AgentService + 'static) -> Self {
        self.agents = Some(Arc::new(service));
        self
    }

    /// Replace the simulated OCR
    pub fn with_ocr(mut self, ocr: impl ImageTextExtractor + 'static) -> Self {
        self.ocr = Some(Arc::new(ocr));
        self
    }

    /// Bus that `/events` subscribes to
    ///
    /// Stores publish on whichever bus they were given; pass the same one
    /// here so the event stream sees their mutations.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn with_offline(mut self, cache: AssetCache, source: impl AssetSource + 'static) -> Self {
        self.assets = Some(OfflineAssets {
            cache,
            source: Arc::new(source),
        });
        self
    }

    pub fn build(self) -> SuitcutResult<AppContext> {
        fn missing(field: &str) -> ConfigError {
            ConfigError::MissingField {
                field: field.to_string(),
                context: "AppContextBuilder".to_string(),
            }
        }

        Ok(AppContext {
            orders: self.orders.ok_or_else(|| missing("orders"))?,
            customers: self.customers.ok_or_else(|| missing("customers"))?,
            agents: self.agents.ok_or_else(|| missing("agents"))?,
            ocr: self.ocr.unwrap_or_else(|| Arc::new(SimulatedOcr)),
            events: self.events.unwrap_or_default(),
            assets: self.assets,
        })
    }
}
