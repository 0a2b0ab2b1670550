//! Call-site validation for intake payloads

pub mod extractor;
pub mod validators;

pub use extractor::Validated;
pub use validators::{check_order_sheet, iso_date, non_blank};
