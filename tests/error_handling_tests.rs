//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::http::StatusCode;
use axum::response::IntoResponse;
use suitcut::core::error::{
    AgentError, ConfigError, FieldValidationError, OrderError, RequestError, StorageError,
    TransitionError, ValidationError,
};
use suitcut::intake::{CaptureError, OcrError};
use suitcut::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_lookup_misses_return_404() {
        let id = Uuid::new_v4();
        let errors: Vec<SuitcutError> = vec![
            OrderError::NotFound { id }.into(),
            AgentError::NotFound { id }.into(),
            RequestError::NotFound {
                path: "/assets/x".to_string(),
            }
            .into(),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND, "{err}");
        }
    }

    #[test]
    fn test_illegal_transition_returns_409() {
        let err: SuitcutError = TransitionError::NotAllowed {
            order_id: Uuid::new_v4(),
            from: OrderStatus::FinalCutting,
            to: OrderStatus::FitCheck,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_bad_input_returns_400() {
        let errors: Vec<SuitcutError> = vec![
            ValidationError::UnknownStatus {
                value: "Shipped".to_string(),
            }
            .into(),
            ValidationError::FieldErrors(vec![]).into(),
            RequestError::InvalidEntityId {
                id: "abc".to_string(),
            }
            .into(),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn test_wiring_and_storage_failures_return_500() {
        let missing: SuitcutError = ConfigError::MissingField {
            field: "orders".to_string(),
            context: "AppContextBuilder".to_string(),
        }
        .into();
        assert_eq!(missing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let poisoned: SuitcutError = StorageError::LockPoisoned {
            store: "orders".to_string(),
        }
        .into();
        assert_eq!(poisoned.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Response Body Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_transition_details_list_offered_moves() {
        let err: SuitcutError = TransitionError::NotAllowed {
            order_id: Uuid::nil(),
            from: OrderStatus::FitCheck,
            to: OrderStatus::Completed,
        }
        .into();

        let response = err.to_response();
        assert_eq!(response.code, "TRANSITION_NOT_ALLOWED");
        let details = response.details.unwrap();
        assert_eq!(
            details["offered"],
            serde_json::json!(["Tailor Final Paper Sent", "Final Cutting"])
        );
    }

    #[test]
    fn test_field_errors_in_details() {
        let err: SuitcutError = ValidationError::FieldErrors(vec![FieldValidationError {
            field: "mobile".to_string(),
            message: "must not be blank".to_string(),
        }])
        .into();

        let body = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "mobile");
    }

    #[test]
    fn test_into_response_status() {
        let err: SuitcutError = OrderError::NotFound { id: Uuid::nil() }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let err: SuitcutError = AgentError::NotFound { id: Uuid::nil() }.into();
        let body = serde_json::to_value(err.to_response()).unwrap();
        assert!(body.get("details").is_none());
        assert_eq!(body["code"], "AGENT_NOT_FOUND");
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_unknown_label_parses_to_validation_error() {
        let err = "Shipped".parse::<OrderStatus>().unwrap_err();
        let err: SuitcutError = err.into();
        assert_eq!(err.error_code(), "UNKNOWN_STATUS");
    }

    #[test]
    fn test_backend_errors_are_internal() {
        let capture: SuitcutError = CaptureError::InvalidScale(0.0).into();
        assert_eq!(capture.error_code(), "INTERNAL_ERROR");

        let ocr: SuitcutError = OcrError::Extraction("service down".to_string()).into();
        assert_eq!(ocr.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(ocr.to_string().contains("service down"));
    }

    #[tokio::test]
    async fn test_store_rejection_matches_on_variant() {
        let orders = InMemoryOrderService::new();
        let order = orders
            .create(OrderFormValues::blank(Uuid::new_v4()), None)
            .await
            .unwrap();

        match orders.set_status(&order.id(), OrderStatus::Completed).await {
            Err(SuitcutError::Transition(TransitionError::NotAllowed { from, to, .. })) => {
                assert_eq!(from, OrderStatus::IntakeIdCard);
                assert_eq!(to, OrderStatus::Completed);
            }
            other => panic!("expected a rejected transition, got {other:?}"),
        }
    }
}
