//! Sales agents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::Entity;

/// A sales agent working in one of the shops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub shop: String,
}

impl Agent {
    pub fn new(id: Uuid, name: impl Into<String>, shop: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            shop: shop.into(),
        }
    }
}

impl Entity for Agent {
    fn resource_name() -> &'static str {
        "agents"
    }

    fn id(&self) -> Uuid {
        self.id
    }
}
