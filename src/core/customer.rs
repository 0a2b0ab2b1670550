//! Customer records

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::entity::Entity;
use crate::core::validation::non_blank;

/// A known customer of the shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// A customer before the store has assigned an id
///
/// The store accepts any payload; callers validate with [`Validate`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewCustomer {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hotel: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

impl NewCustomer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_stay(mut self, hotel: impl Into<String>, room: impl Into<String>) -> Self {
        self.hotel = Some(hotel.into());
        self.room = Some(room.into());
        self
    }

    /// Attach a freshly generated id
    pub fn into_customer(self) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            hotel: self.hotel,
            room: self.room,
        }
    }
}

impl Entity for Customer {
    fn resource_name() -> &'static str {
        "customers"
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_customer_generates_id() {
        let customer = NewCustomer::named("Jordan Blake")
            .with_phone("123")
            .into_customer();
        assert!(!customer.id.is_nil());
        assert_eq!(customer.name, "Jordan Blake");
        assert_eq!(customer.phone.as_deref(), Some("123"));
        assert!(customer.email.is_none());
    }

    #[test]
    fn test_validation_requires_trimmed_name() {
        assert!(NewCustomer::named("Riley").validate().is_ok());
        assert!(NewCustomer::named("   ").validate().is_err());
        assert!(NewCustomer::named("").validate().is_err());
    }
}
