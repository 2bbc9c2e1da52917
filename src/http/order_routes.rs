//! # Order Routes
//!
//! Ticket orders, scoped to the authenticated user. Any logged-in user
//! may book seats; nobody sees another user's orders.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::{Order, OrderCreate, Page};
use crate::http::response::{catalog_error, ApiError, ListResponse};
use crate::http::state::ApiState;

/// Order routes, mounted under `/api/orders`
pub fn order_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/", get(list_orders).post(create_order))
        .route("/orders/:id/", get(get_order))
        .route("/orders/:id", get(get_order))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct OrderParams {
    limit: Option<usize>,
    offset: Option<usize>,
}

async fn list_orders(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<OrderParams>,
) -> Result<Json<ListResponse<Order>>, ApiError> {
    let ctx = state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;

    let listing = state
        .catalog
        .list_orders(ctx.user_id, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_order(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<OrderCreate>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let ctx = state.authorize(&headers)?;
    let order = state
        .catalog
        .create_order(ctx.user_id, request)
        .map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_order(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let ctx = state.authorize(&headers)?;
    let order = state
        .catalog
        .get_order(id, ctx.user_id)
        .map_err(catalog_error)?;
    Ok(Json(order))
}
