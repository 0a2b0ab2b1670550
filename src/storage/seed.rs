//! Hard-coded seed data
//!
//! Nothing persists across restarts; every store starts from these records.

use chrono::Utc;
use uuid::Uuid;

use crate::core::agent::Agent;
use crate::core::customer::Customer;
use crate::core::order::{Order, OrderFormValues, OrderLine};
use crate::core::status::OrderStatus;

pub const AGENT_AVERY_QUINN: Uuid = Uuid::from_u128(0x5c0a_0000_0000_4000_8000_0000_0000_00a1);
pub const AGENT_KAI_MORGAN: Uuid = Uuid::from_u128(0x5c0a_0000_0000_4000_8000_0000_0000_00a2);
pub const AGENT_RILEY_CHEN: Uuid = Uuid::from_u128(0x5c0a_0000_0000_4000_8000_0000_0000_00a3);

pub const CUSTOMER_JORDAN_BLAKE: Uuid = Uuid::from_u128(0x5c0c_0000_0000_4000_8000_0000_0000_00c1);
pub const CUSTOMER_RILEY_CHEN: Uuid = Uuid::from_u128(0x5c0c_0000_0000_4000_8000_0000_0000_00c2);

pub const ORDER_JORDAN_BLAKE: Uuid = Uuid::from_u128(0x5c0d_0000_0000_4000_8000_0000_0000_00d1);

/// The fixed agent roster; the first agent starts selected
pub fn agents() -> Vec<Agent> {
    vec![
        Agent::new(AGENT_AVERY_QUINN, "Avery Quinn", "Midtown Tailors"),
        Agent::new(AGENT_KAI_MORGAN, "Kai Morgan", "Soho Atelier"),
        Agent::new(AGENT_RILEY_CHEN, "Riley Chen", "Uptown Stitch"),
    ]
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: CUSTOMER_JORDAN_BLAKE,
            name: "Jordan Blake".to_string(),
            phone: Some("+66 89 555 0012".to_string()),
            email: Some("jordan@example.com".to_string()),
            hotel: Some("Four Seasons".to_string()),
            room: Some("1203".to_string()),
        },
        Customer {
            id: CUSTOMER_RILEY_CHEN,
            name: "Riley Chen".to_string(),
            phone: Some("+66 82 111 2222".to_string()),
            email: Some("riley@example.com".to_string()),
            hotel: None,
            room: None,
        },
    ]
}

pub fn orders() -> Vec<Order> {
    let sheet = OrderFormValues {
        order_number: "03527".to_string(),
        date: "2024-12-18".to_string(),
        fitting: "Tomorrow 3PM".to_string(),
        pick_up: "Dec 22, 5PM".to_string(),
        name: "Jordan Blake".to_string(),
        hotel: "Four Seasons".to_string(),
        room: "1203".to_string(),
        address: "Lobby concierge desk".to_string(),
        mobile: "+66 89 555 0012".to_string(),
        email: "jordan@example.com".to_string(),
        lines: vec![
            OrderLine::new("Navy wool suit - peak lapel, double vent", "18000"),
            OrderLine::new("White pinpoint shirt", "1800"),
            OrderLine::new("Alteration: shorten sleeves", "300"),
        ],
        total: "20100".to_string(),
        deposit: "5000".to_string(),
        balance: "15100".to_string(),
        fabric_type: "Navy wool".to_string(),
        fabric_per_item: "3.2".to_string(),
        quantity: "1".to_string(),
        fabric_total: String::new(),
        agent_id: AGENT_AVERY_QUINN,
    };

    let order = Order::restore(ORDER_JORDAN_BLAKE, OrderStatus::INITIAL, Utc::now(), sheet);
    vec![order]
}
