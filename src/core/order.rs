//! Order entity and the factory that creates it from intake values

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::attachment::Attachment;
use crate::core::entity::Entity;
use crate::core::fabric::fabric_total;
use crate::core::status::OrderStatus;

/// Number of blank lines a fresh intake sheet starts with
pub const DEFAULT_LINE_COUNT: usize = 3;

/// One row of the order sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub description: String,
    /// Free text, not validated as a number
    pub amount: String,
}

impl OrderLine {
    pub fn new(description: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// A line counts as filled when it has a description
    pub fn is_filled(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Everything the intake sheet collects before submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderFormValues {
    /// Cosmetic display number, not guaranteed unique
    pub order_number: String,
    pub date: String,
    pub fitting: String,
    pub pick_up: String,
    pub name: String,
    pub hotel: String,
    pub room: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub lines: Vec<OrderLine>,
    pub total: String,
    pub deposit: String,
    pub balance: String,
    pub fabric_type: String,
    pub fabric_per_item: String,
    pub quantity: String,
    /// Derived from `quantity` × `fabric_per_item`
    pub fabric_total: String,
    pub agent_id: Uuid,
}

impl OrderFormValues {
    /// Blank sheet for the given agent, with a fresh order number and today's date
    pub fn blank(agent_id: Uuid) -> Self {
        Self {
            order_number: generate_order_number(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            lines: vec![OrderLine::default(); DEFAULT_LINE_COUNT],
            agent_id,
            ..Default::default()
        }
    }

    /// Recompute the derived fabric total from the current inputs
    pub fn recompute_fabric_total(&mut self) {
        self.fabric_total = fabric_total(&self.quantity, &self.fabric_per_item);
    }
}

/// Random five-digit display number, zero-padded
pub fn generate_order_number() -> String {
    let n: u32 = rand::rng().random_range(0..99_999);
    format!("{:05}", n)
}

/// A customer order moving through the pipeline
///
/// `id`, `created_at` and `status` are private: the first two never change
/// and the status is only moved by the order store along legal transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: Uuid,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub sheet: OrderFormValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Order {
    /// Create an order from submitted intake values
    ///
    /// The order gets a fresh id, the first pipeline stage and the current
    /// time. The fabric total is recomputed so it always matches its inputs.
    pub fn create(mut sheet: OrderFormValues, attachment: Option<Attachment>) -> Self {
        sheet.recompute_fabric_total();
        Self {
            id: Uuid::new_v4(),
            status: OrderStatus::INITIAL,
            created_at: Utc::now(),
            sheet,
            attachment,
        }
    }

    /// Rebuild a known record, used for seed data
    pub(crate) fn restore(
        id: Uuid,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        mut sheet: OrderFormValues,
    ) -> Self {
        sheet.recompute_fabric_total();
        Self {
            id,
            status,
            created_at,
            sheet,
            attachment: None,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn agent_id(&self) -> Uuid {
        self.sheet.agent_id
    }

    /// Lines with a description, in entry order
    pub fn filled_lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.sheet.lines.iter().filter(|line| line.is_filled())
    }

    /// The first two filled lines, as shown on an order card
    pub fn preview(&self) -> String {
        self.filled_lines()
            .take(2)
            .map(|line| line.description.as_str())
            .collect::<Vec<_>>()
            .join(" • ")
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}

impl Entity for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> OrderFormValues {
        let mut values = OrderFormValues::blank(Uuid::new_v4());
        values.name = "Jordan Blake".to_string();
        values.quantity = "2".to_string();
        values.fabric_per_item = "3.1".to_string();
        values
    }

    #[test]
    fn test_create_starts_at_first_stage() {
        let order = Order::create(sheet(), None);
        assert_eq!(order.status(), OrderStatus::IntakeIdCard);
        assert!(order.created_at().is_some());
        assert_eq!(order.sheet.fabric_total, "6.20");
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let a = Order::create(sheet(), None);
        let b = Order::create(sheet(), None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_fabric_total_is_derived_not_trusted() {
        let mut values = sheet();
        values.fabric_total = "999".to_string();
        let order = Order::create(values, None);
        assert_eq!(order.sheet.fabric_total, "6.20");
    }

    #[test]
    fn test_blank_sheet() {
        let agent = Uuid::new_v4();
        let values = OrderFormValues::blank(agent);
        assert_eq!(values.lines.len(), DEFAULT_LINE_COUNT);
        assert_eq!(values.order_number.len(), 5);
        assert!(values.order_number.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(values.date.len(), 10);
        assert_eq!(values.agent_id, agent);
    }

    #[test]
    fn test_filled_lines_and_preview() {
        let mut values = sheet();
        values.lines = vec![
            OrderLine::new("Navy suit", "18000"),
            OrderLine::new("", "50"),
            OrderLine::new("White shirt", "1800"),
            OrderLine::new("Alteration", "300"),
        ];
        let order = Order::create(values, None);
        assert_eq!(order.filled_lines().count(), 3);
        assert_eq!(order.preview(), "Navy suit • White shirt");
    }

    #[test]
    fn test_serializes_flat_camel_case() {
        let order = Order::create(sheet(), None);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "Intake: ID / Name Card");
        assert_eq!(json["fabricTotal"], "6.20");
        assert!(json.get("attachment").is_none());
        assert!(json.get("orderNumber").is_some());
    }
}
