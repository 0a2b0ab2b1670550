//! Route table

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::context::AppContext;
use crate::server::handlers::{
    advance_order, create_customer, create_order, dashboard, event_stream, get_order,
    health_check, list_agents, list_customers, list_orders, order_transitions, print_order,
    regress_order, select_agent, selected_agent, serve_asset, set_order_status, simulate_ocr,
    status_counts,
};

/// Build the full HTTP surface over `ctx`
///
/// - GET /health
/// - GET /agents, GET|PUT /agents/selected
/// - GET|POST /customers
/// - GET|POST /orders, GET /orders/{id}
/// - GET /orders/{id}/transitions, POST /orders/{id}/advance, POST /orders/{id}/regress
/// - PUT /orders/{id}/status
/// - GET /orders/{id}/print
/// - GET /dashboard, GET /dashboard/status-counts
/// - POST /ocr/simulate
/// - GET /events
/// - GET /assets/{*path}
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/agents", get(list_agents))
        .route("/agents/selected", get(selected_agent).put(select_agent))
        .route("/customers", get(list_customers).post(create_customer))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/transitions", get(order_transitions))
        .route("/orders/{id}/advance", post(advance_order))
        .route("/orders/{id}/regress", post(regress_order))
        .route("/orders/{id}/status", put(set_order_status))
        .route("/orders/{id}/print", get(print_order))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/status-counts", get(status_counts))
        .route("/ocr/simulate", post(simulate_ocr))
        .route("/events", get(event_stream))
        .route("/assets/{*path}", get(serve_asset))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use futures::StreamExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::AppConfig;
    use crate::core::entity::Entity;
    use crate::core::order::OrderFormValues;
    use crate::core::service::OrderService;
    use crate::core::status::TransitionKind;
    use crate::storage::{InMemoryAgentService, InMemoryCustomerService, InMemoryOrderService};
    use super::*;

    fn router() -> Router {
        let ctx = AppContext::builder()
            .with_orders(InMemoryOrderService::seeded())
            .with_customers(InMemoryCustomerService::seeded())
            .with_agents(InMemoryAgentService::seeded())
            .build()
            .unwrap();
        build_router(ctx)
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = router()
            .oneshot(Request::get("/links").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_allowed() {
        let response = router()
            .oneshot(
                Request::options("/orders")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let headers = response.headers();
        assert!(headers.contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_event_stream_delivers_status_change() {
        let ctx = AppContext::from_config(&AppConfig::default()).await.unwrap();
        let order = ctx
            .orders
            .create(OrderFormValues::blank(Uuid::nil()), None)
            .await
            .unwrap();

        let response = build_router(ctx.clone())
            .oneshot(Request::get("/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        ctx.orders
            .apply(&order.id(), TransitionKind::Advance)
            .await
            .unwrap();

        let mut body = response.into_body().into_data_stream();
        let frame = tokio::time::timeout(Duration::from_secs(5), body.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        let frame = String::from_utf8(frame.to_vec()).unwrap();

        assert!(frame.starts_with("event: order\n"), "{frame}");
        assert!(frame.contains(r#""action":"status_changed""#), "{frame}");
        assert!(frame.contains(&order.id().to_string()), "{frame}");
        assert!(frame.contains(r#""to":"OCR Captured""#), "{frame}");
    }
}
