//! Order intake: the form, the freehand capture surface and card OCR

pub mod capture;
pub mod form;
pub mod ocr;

pub use capture::{CaptureError, CaptureSession, DrawingSurface, InMemorySurface, PointerSample};
pub use form::{FabricField, FormField, LineField, OrderForm};
pub use ocr::{CardExtract, CardImage, ImageTextExtractor, OcrError, SimulatedOcr};

use crate::core::entity::Entity;
use crate::core::error::SuitcutResult;
use crate::core::order::Order;
use crate::core::service::OrderService;

/// Submit `form` and create the resulting order in `orders`
///
/// The form and the drawing are only reset once the order exists. A failed
/// create leaves both as they were.
pub async fn submit_order<S: DrawingSurface>(
    form: &mut OrderForm,
    capture: &mut CaptureSession<S>,
    orders: &dyn OrderService,
) -> SuitcutResult<Order> {
    let (values, attachment) = form.submission(capture)?;
    let order = orders.create(values, attachment).await?;
    form.reset(capture);
    tracing::debug!(order_id = %order.id(), "intake form submitted");
    Ok(order)
}
