//! # Suitcut
//!
//! Order tracking for bespoke tailoring shops.
//!
//! Orders move through a fixed sixteen-stage pipeline, from ID-card intake
//! to completion. The only backward move is a failed fitting, which sends
//! the order back to `Final Cutting`.
//!
//! ## Features
//!
//! - **Status pipeline**: ordered stages, successor/regression rules and badge tones
//! - **Enforced transitions**: the order store rejects any move the pipeline does not offer
//! - **In-memory stores**: orders, customers and the agent roster, seeded on start
//! - **Intake**: form state with derived fabric totals, freehand capture and simulated OCR
//! - **Print sheets**: HTML summaries rendered with `tera`
//! - **HTTP surface**: axum routes plus a server-sent event stream of store changes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use suitcut::prelude::*;
//!
//! let orders = InMemoryOrderService::new();
//! let mut form = OrderForm::open(seed::AGENT_AVERY_QUINN);
//! form.set_field(FormField::Name, "Jordan Blake");
//! form.set_fabric(FabricField::Quantity, "2");
//! form.set_fabric(FabricField::FabricPerItem, "3.1");
//!
//! let mut capture = CaptureSession::default();
//! let order = submit_order(&mut form, &mut capture, &orders).await?;
//! assert_eq!(order.sheet.fabric_total, "6.20");
//!
//! orders.apply(&order.id(), TransitionKind::Advance).await?;
//! ```

pub mod config;
pub mod core;
pub mod intake;
pub mod offline;
pub mod print;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        agent::Agent,
        attachment::Attachment,
        customer::{Customer, NewCustomer},
        entity::Entity,
        error::{SuitcutError, SuitcutResult},
        events::{EventBus, EventEnvelope, StoreEvent},
        fabric::fabric_total,
        order::{Order, OrderFormValues, OrderLine},
        service::{AgentService, CustomerService, OrderService, StatusCounts},
        status::{OrderStatus, StatusTone, Transition, TransitionKind},
    };

    // === Intake ===
    pub use crate::intake::{
        CaptureSession, CardExtract, CardImage, DrawingSurface, FabricField, FormField,
        ImageTextExtractor, InMemorySurface, LineField, OrderForm, PointerSample, SimulatedOcr,
        submit_order,
    };

    // === Print ===
    pub use crate::print::{PrintSurface, PrintWindow, print_order, render_order_summary};

    // === Storage ===
    pub use crate::storage::{
        InMemoryAgentService, InMemoryCustomerService, InMemoryOrderService, seed,
    };

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppContext, AppContextBuilder, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
