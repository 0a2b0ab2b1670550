//! HTTP handlers
//!
//! Handlers only translate between HTTP and the store traits. Lookup misses
//! become 404s here; the stores themselves treat them as no-ops.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::core::agent::Agent;
use crate::core::attachment::Attachment;
use crate::core::customer::{Customer, NewCustomer};
use crate::core::entity::Entity;
use crate::core::error::{AgentError, OrderError, RequestError, SuitcutResult, ValidationError};
use crate::core::order::{Order, OrderFormValues};
use crate::core::service::StatusCounts;
use crate::core::status::{OrderStatus, StatusTone, TransitionKind};
use crate::core::validation::{Validated, check_order_sheet};
use crate::intake::ocr::CardExtract;
use crate::print::render_order_summary;
use crate::server::context::AppContext;

fn parse_id(raw: &str) -> SuitcutResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        RequestError::InvalidEntityId {
            id: raw.to_string(),
        }
        .into()
    })
}

async fn load_order(ctx: &AppContext, raw_id: &str) -> SuitcutResult<Order> {
    let id = parse_id(raw_id)?;
    ctx.orders
        .get(&id)
        .await?
        .ok_or_else(|| OrderError::NotFound { id }.into())
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "suitcut"
    }))
}

// =============================================================================
// Agents
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectAgentRequest {
    pub agent_id: Uuid,
}

pub async fn list_agents(State(ctx): State<AppContext>) -> SuitcutResult<Json<Vec<Agent>>> {
    Ok(Json(ctx.agents.list().await?))
}

pub async fn selected_agent(State(ctx): State<AppContext>) -> SuitcutResult<Json<Agent>> {
    Ok(Json(ctx.agents.selected().await?))
}

pub async fn select_agent(
    State(ctx): State<AppContext>,
    Json(request): Json<SelectAgentRequest>,
) -> SuitcutResult<Json<Agent>> {
    Ok(Json(ctx.agents.select(&request.agent_id).await?))
}

// =============================================================================
// Customers
// =============================================================================

pub async fn list_customers(State(ctx): State<AppContext>) -> SuitcutResult<Json<Vec<Customer>>> {
    Ok(Json(ctx.customers.list().await?))
}

pub async fn create_customer(
    State(ctx): State<AppContext>,
    Validated(mut payload): Validated<NewCustomer>,
) -> SuitcutResult<(StatusCode, Json<Customer>)> {
    payload.name = payload.name.trim().to_string();
    let customer = ctx.customers.add(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub values: OrderFormValues,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// An action a board view may offer for an order
#[derive(Debug, Serialize)]
pub struct OfferedTransition {
    pub kind: TransitionKind,
    pub to: OrderStatus,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct TransitionsResponse {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub tone: StatusTone,
    pub transitions: Vec<OfferedTransition>,
}

pub async fn list_orders(
    State(ctx): State<AppContext>,
    Query(query): Query<ListOrdersQuery>,
) -> SuitcutResult<Json<Vec<Order>>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;
    Ok(Json(ctx.orders.list(status).await?))
}

/// Submit an intake sheet
///
/// An unset agent id falls back to the currently selected agent.
pub async fn create_order(
    State(ctx): State<AppContext>,
    Json(request): Json<CreateOrderRequest>,
) -> SuitcutResult<(StatusCode, Json<Order>)> {
    let mut values = request.values;

    let errors = check_order_sheet(&values);
    if !errors.is_empty() {
        return Err(ValidationError::FieldErrors(errors).into());
    }

    if values.agent_id.is_nil() {
        values.agent_id = ctx.agents.selected().await?.id;
    } else if ctx.agents.get(&values.agent_id).await?.is_none() {
        return Err(AgentError::NotFound {
            id: values.agent_id,
        }
        .into());
    }

    let order = ctx.orders.create(values, request.attachment).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> SuitcutResult<Json<Order>> {
    Ok(Json(load_order(&ctx, &id).await?))
}

pub async fn order_transitions(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> SuitcutResult<Json<TransitionsResponse>> {
    let order = load_order(&ctx, &id).await?;
    let status = order.status();

    Ok(Json(TransitionsResponse {
        order_id: order.id(),
        status,
        tone: status.tone(),
        transitions: status
            .offered_transitions()
            .into_iter()
            .map(|t| OfferedTransition {
                kind: t.kind,
                to: t.to,
                label: t.action_label(),
            })
            .collect(),
    }))
}

async fn apply_transition(
    ctx: &AppContext,
    raw_id: &str,
    kind: TransitionKind,
) -> SuitcutResult<Json<Order>> {
    let id = parse_id(raw_id)?;
    ctx.orders
        .apply(&id, kind)
        .await?
        .map(Json)
        .ok_or_else(|| OrderError::NotFound { id }.into())
}

pub async fn advance_order(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> SuitcutResult<Json<Order>> {
    apply_transition(&ctx, &id, TransitionKind::Advance).await
}

pub async fn regress_order(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> SuitcutResult<Json<Order>> {
    apply_transition(&ctx, &id, TransitionKind::Regress).await
}

pub async fn set_order_status(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> SuitcutResult<Json<Order>> {
    let id = parse_id(&id)?;
    let status: OrderStatus = request.status.parse()?;
    ctx.orders
        .set_status(&id, status)
        .await?
        .map(Json)
        .ok_or_else(|| OrderError::NotFound { id }.into())
}

pub async fn print_order(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> SuitcutResult<Html<String>> {
    let order = load_order(&ctx, &id).await?;
    let agent_name = ctx
        .agents
        .get(&order.agent_id())
        .await?
        .map(|a| a.name)
        .unwrap_or_else(|| order.agent_id().to_string());
    Ok(Html(render_order_summary(&order, &agent_name)?))
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Serialize)]
pub struct StageCount {
    pub status: OrderStatus,
    pub tone: StatusTone,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub agent: Agent,
    pub total: usize,
    pub stages: Vec<StageCount>,
}

pub async fn dashboard(State(ctx): State<AppContext>) -> SuitcutResult<Json<DashboardResponse>> {
    let agent = ctx.agents.selected().await?;
    let counts = ctx.orders.aggregate_counts().await?;

    Ok(Json(DashboardResponse {
        agent,
        total: counts.values().sum(),
        stages: counts
            .into_iter()
            .map(|(status, count)| StageCount {
                status,
                tone: status.tone(),
                count,
            })
            .collect(),
    }))
}

pub async fn status_counts(State(ctx): State<AppContext>) -> SuitcutResult<Json<StatusCounts>> {
    Ok(Json(ctx.orders.aggregate_counts().await?))
}

// =============================================================================
// OCR, events, assets
// =============================================================================

pub async fn simulate_ocr(State(ctx): State<AppContext>) -> SuitcutResult<Json<CardExtract>> {
    Ok(Json(ctx.ocr.extract(None).await?))
}

/// Stream store mutations as server-sent events
///
/// Each event is named after the store that produced it and carries the
/// JSON envelope. Events a slow client missed are skipped.
pub async fn event_stream(
    State(ctx): State<AppContext>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = BroadcastStream::new(ctx.events.subscribe())
        .filter_map(|received| received.ok())
        .map(|envelope| {
            Event::default()
                .event(envelope.event.event_kind())
                .id(envelope.id.to_string())
                .json_data(&envelope)
        });

    tracing::debug!("event stream subscriber connected");
    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn serve_asset(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
) -> SuitcutResult<Response> {
    let path = format!("/{}", path.trim_start_matches('/'));
    let not_found = || RequestError::NotFound { path: path.clone() };

    let Some(assets) = &ctx.assets else {
        return Err(not_found().into());
    };
    let fetched = assets
        .cache
        .fetch(&path, assets.source.as_ref())
        .await
        .map_err(|e| {
            tracing::debug!(%path, error = %e, "asset unavailable");
            not_found()
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, fetched.asset.content_type),
            (
                header::HeaderName::from_static("x-cache-origin"),
                format!("{:?}", fetched.origin).to_lowercase(),
            ),
        ],
        fetched.asset.body,
    )
        .into_response())
}
