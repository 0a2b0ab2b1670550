//! Intake form state
//!
//! The form owns an [`OrderFormValues`] sheet between opening and submission.
//! The derived fabric total is recomputed whenever a fabric input changes,
//! and the agent id follows the selected agent until submit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::attachment::Attachment;
use crate::core::customer::Customer;
use crate::core::order::{OrderFormValues, OrderLine};
use crate::intake::capture::{CaptureError, CaptureSession, DrawingSurface};
use crate::intake::ocr::CardExtract;

/// Plain text fields of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    OrderNumber,
    Date,
    Fitting,
    PickUp,
    Name,
    Hotel,
    Room,
    Address,
    Mobile,
    Email,
    Total,
    Deposit,
    Balance,
}

/// Fabric inputs; changing any of them recomputes the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FabricField {
    FabricType,
    FabricPerItem,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineField {
    Description,
    Amount,
}

/// An open intake sheet
#[derive(Debug, Clone)]
pub struct OrderForm {
    values: OrderFormValues,
    selected_customer: Option<Uuid>,
}

impl OrderForm {
    /// Open a blank sheet for `agent_id`
    pub fn open(agent_id: Uuid) -> Self {
        Self {
            values: OrderFormValues::blank(agent_id),
            selected_customer: None,
        }
    }

    pub fn values(&self) -> &OrderFormValues {
        &self.values
    }

    /// Customer last picked from the customer list, if any
    pub fn selected_customer(&self) -> Option<Uuid> {
        self.selected_customer
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        let v = &mut self.values;
        match field {
            FormField::OrderNumber => &mut v.order_number,
            FormField::Date => &mut v.date,
            FormField::Fitting => &mut v.fitting,
            FormField::PickUp => &mut v.pick_up,
            FormField::Name => &mut v.name,
            FormField::Hotel => &mut v.hotel,
            FormField::Room => &mut v.room,
            FormField::Address => &mut v.address,
            FormField::Mobile => &mut v.mobile,
            FormField::Email => &mut v.email,
            FormField::Total => &mut v.total,
            FormField::Deposit => &mut v.deposit,
            FormField::Balance => &mut v.balance,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn set_fabric(&mut self, field: FabricField, value: impl Into<String>) {
        let v = &mut self.values;
        let target = match field {
            FabricField::FabricType => &mut v.fabric_type,
            FabricField::FabricPerItem => &mut v.fabric_per_item,
            FabricField::Quantity => &mut v.quantity,
        };
        *target = value.into();
        v.recompute_fabric_total();
    }

    /// Edit one cell of the line table
    ///
    /// Returns `false` when `index` is past the last line.
    pub fn set_line(&mut self, index: usize, field: LineField, value: impl Into<String>) -> bool {
        let Some(line) = self.values.lines.get_mut(index) else {
            return false;
        };
        match field {
            LineField::Description => line.description = value.into(),
            LineField::Amount => line.amount = value.into(),
        }
        true
    }

    /// Append a blank line and return its index
    pub fn add_line(&mut self) -> usize {
        self.values.lines.push(OrderLine::default());
        self.values.lines.len() - 1
    }

    /// Point the sheet at the currently selected agent
    pub fn sync_agent(&mut self, agent_id: Uuid) {
        self.values.agent_id = agent_id;
    }

    /// Prefill contact fields from a known customer
    ///
    /// The name is always replaced; other fields only when the customer has them.
    pub fn apply_customer(&mut self, customer: &Customer) {
        let v = &mut self.values;
        v.name = customer.name.clone();
        if let Some(phone) = &customer.phone {
            v.mobile = phone.clone();
        }
        if let Some(email) = &customer.email {
            v.email = email.clone();
        }
        if let Some(hotel) = &customer.hotel {
            v.hotel = hotel.clone();
        }
        if let Some(room) = &customer.room {
            v.room = room.clone();
        }
        self.selected_customer = Some(customer.id);
    }

    /// Prefill contact fields from text read off a card
    pub fn apply_card_extract(&mut self, extract: &CardExtract) {
        let v = &mut self.values;
        if let Some(name) = &extract.name {
            v.name = name.clone();
        }
        if let Some(phone) = &extract.phone {
            v.mobile = phone.clone();
        }
        if let Some(email) = &extract.email {
            v.email = email.clone();
        }
    }

    /// The sheet and drawing a submit hands over, leaving the form as is
    ///
    /// The drawing is the explicitly saved snapshot, or the current surface
    /// content when nothing was saved.
    pub fn submission<S: DrawingSurface>(
        &self,
        capture: &CaptureSession<S>,
    ) -> Result<(OrderFormValues, Option<Attachment>), CaptureError> {
        let attachment = capture.attachment_for_submit()?;
        Ok((self.values.clone(), Some(attachment)))
    }

    /// Start a fresh sheet for the same agent and clear the surface
    pub fn reset<S: DrawingSurface>(&mut self, capture: &mut CaptureSession<S>) {
        self.values = OrderFormValues::blank(self.values.agent_id);
        self.selected_customer = None;
        capture.clear();
    }

    /// Hand over the sheet and the captured drawing, then start over
    pub fn submit<S: DrawingSurface>(
        &mut self,
        capture: &mut CaptureSession<S>,
    ) -> Result<(OrderFormValues, Option<Attachment>), CaptureError> {
        let submitted = self.submission(capture)?;
        self.reset(capture);
        tracing::debug!(order_number = %submitted.0.order_number, "intake form submitted");
        Ok(submitted)
    }
}
