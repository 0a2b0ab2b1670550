//! Axum extractor for validated payloads
//!
//! `Validated<T>` deserializes a JSON body and runs `T`'s [`Validate`] rules
//! before the handler sees it.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::error::{SuitcutError, ValidationError};

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_customer(
///     State(ctx): State<AppContext>,
///     Validated(payload): Validated<NewCustomer>,
/// ) -> SuitcutResult<Json<Customer>> {
///     // payload.name is already known to be non-blank
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = SuitcutError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
            SuitcutError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        payload.validate()?;
        Ok(Validated(payload))
    }
}
