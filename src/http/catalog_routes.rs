//! # Catalog Routes
//!
//! CRUD endpoints for airports, airplane types, airplanes, routes, crews
//! and flights. Every endpoint requires a bearer token; mutations require
//! the superuser flag.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::{
    AirplaneCreate, AirplaneFilter, AirplaneType, AirplaneTypeCreate, AirplaneTypeFilter,
    AirplaneTypeUpdate, AirplaneUpdate, AirplaneView, Airport, AirportCreate, AirportFilter,
    AirportUpdate, Crew, CrewCreate, CrewFilter, CrewUpdate, FlightCreate, FlightDetail,
    FlightFilter, FlightUpdate, FlightView, Page, RouteCreate, RouteDetail, RouteFilter,
    RouteUpdate, RouteView,
};
use crate::http::response::{catalog_error, ApiError, ListResponse};
use crate::http::state::ApiState;

/// Catalog routes, mounted under `/api`. Every path is registered with
/// and without a trailing slash, like the user and order routers.
pub fn catalog_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/airports", get(list_airports).post(create_airport))
        .route("/airports/", get(list_airports).post(create_airport))
        .route(
            "/airports/:id",
            get(get_airport).patch(update_airport).delete(delete_airport),
        )
        .route(
            "/airports/:id/",
            get(get_airport).patch(update_airport).delete(delete_airport),
        )
        .route(
            "/airplane_types",
            get(list_airplane_types).post(create_airplane_type),
        )
        .route(
            "/airplane_types/",
            get(list_airplane_types).post(create_airplane_type),
        )
        .route(
            "/airplane_types/:id",
            get(get_airplane_type)
                .patch(update_airplane_type)
                .delete(delete_airplane_type),
        )
        .route(
            "/airplane_types/:id/",
            get(get_airplane_type)
                .patch(update_airplane_type)
                .delete(delete_airplane_type),
        )
        .route("/airplanes", get(list_airplanes).post(create_airplane))
        .route("/airplanes/", get(list_airplanes).post(create_airplane))
        .route(
            "/airplanes/:id",
            get(get_airplane)
                .patch(update_airplane)
                .delete(delete_airplane),
        )
        .route(
            "/airplanes/:id/",
            get(get_airplane)
                .patch(update_airplane)
                .delete(delete_airplane),
        )
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/", get(list_routes).post(create_route))
        .route(
            "/routes/:id",
            get(get_route).patch(update_route).delete(delete_route),
        )
        .route(
            "/routes/:id/",
            get(get_route).patch(update_route).delete(delete_route),
        )
        .route("/crews", get(list_crews).post(create_crew))
        .route("/crews/", get(list_crews).post(create_crew))
        .route(
            "/crews/:id",
            get(get_crew).patch(update_crew).delete(delete_crew),
        )
        .route(
            "/crews/:id/",
            get(get_crew).patch(update_crew).delete(delete_crew),
        )
        .route("/flights", get(list_flights).post(create_flight))
        .route("/flights/", get(list_flights).post(create_flight))
        .route(
            "/flights/:id",
            get(get_flight).patch(update_flight).delete(delete_flight),
        )
        .route(
            "/flights/:id/",
            get(get_flight).patch(update_flight).delete(delete_flight),
        )
        .with_state(state)
}

// ==================
// Query Parameters
// ==================

#[derive(Debug, Deserialize)]
struct AirportParams {
    name: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct AirplaneTypeParams {
    name: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct AirplaneParams {
    name: Option<String>,
    airplane_type: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CrewParams {
    full_name: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RouteParams {
    from: Option<String>,
    to: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct FlightParams {
    from: Option<String>,
    to: Option<String>,
    departure_time: Option<DateTime<Utc>>,
    arrival_time: Option<DateTime<Utc>>,
    departure_after: Option<DateTime<Utc>>,
    departure_before: Option<DateTime<Utc>>,
    limit: Option<usize>,
    offset: Option<usize>,
}

// ==================
// Airports
// ==================

async fn list_airports(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<AirportParams>,
) -> Result<Json<ListResponse<Airport>>, ApiError> {
    state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;
    let filter = AirportFilter { name: params.name };

    let listing = state
        .catalog
        .list_airports(&filter, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_airport(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<AirportCreate>,
) -> Result<(StatusCode, Json<Airport>), ApiError> {
    state.authorize_superuser(&headers)?;
    let airport = state.catalog.create_airport(request).map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(airport)))
}

async fn get_airport(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Airport>, ApiError> {
    state.authorize(&headers)?;
    let airport = state.catalog.get_airport(id).map_err(catalog_error)?;
    Ok(Json(airport))
}

async fn update_airport(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<AirportUpdate>,
) -> Result<Json<Airport>, ApiError> {
    state.authorize_superuser(&headers)?;
    let airport = state
        .catalog
        .update_airport(id, patch)
        .map_err(catalog_error)?;
    Ok(Json(airport))
}

async fn delete_airport(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.authorize_superuser(&headers)?;
    state.catalog.delete_airport(id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Airplane Types
// ==================

async fn list_airplane_types(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<AirplaneTypeParams>,
) -> Result<Json<ListResponse<AirplaneType>>, ApiError> {
    state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;
    let filter = AirplaneTypeFilter { name: params.name };

    let listing = state
        .catalog
        .list_airplane_types(&filter, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_airplane_type(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<AirplaneTypeCreate>,
) -> Result<(StatusCode, Json<AirplaneType>), ApiError> {
    state.authorize_superuser(&headers)?;
    let airplane_type = state
        .catalog
        .create_airplane_type(request)
        .map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(airplane_type)))
}

async fn get_airplane_type(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AirplaneType>, ApiError> {
    state.authorize(&headers)?;
    let airplane_type = state.catalog.get_airplane_type(id).map_err(catalog_error)?;
    Ok(Json(airplane_type))
}

async fn update_airplane_type(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<AirplaneTypeUpdate>,
) -> Result<Json<AirplaneType>, ApiError> {
    state.authorize_superuser(&headers)?;
    let airplane_type = state
        .catalog
        .update_airplane_type(id, patch)
        .map_err(catalog_error)?;
    Ok(Json(airplane_type))
}

async fn delete_airplane_type(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.authorize_superuser(&headers)?;
    state
        .catalog
        .delete_airplane_type(id)
        .map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Airplanes
// ==================

async fn list_airplanes(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<AirplaneParams>,
) -> Result<Json<ListResponse<AirplaneView>>, ApiError> {
    state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;
    let filter = AirplaneFilter {
        name: params.name,
        airplane_type: params.airplane_type,
    };

    let listing = state
        .catalog
        .list_airplanes(&filter, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_airplane(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<AirplaneCreate>,
) -> Result<(StatusCode, Json<AirplaneView>), ApiError> {
    state.authorize_superuser(&headers)?;
    let airplane = state
        .catalog
        .create_airplane(request)
        .map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(airplane)))
}

async fn get_airplane(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AirplaneView>, ApiError> {
    state.authorize(&headers)?;
    let airplane = state.catalog.get_airplane(id).map_err(catalog_error)?;
    Ok(Json(airplane))
}

async fn update_airplane(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<AirplaneUpdate>,
) -> Result<Json<AirplaneView>, ApiError> {
    state.authorize_superuser(&headers)?;
    let airplane = state
        .catalog
        .update_airplane(id, patch)
        .map_err(catalog_error)?;
    Ok(Json(airplane))
}

async fn delete_airplane(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.authorize_superuser(&headers)?;
    state.catalog.delete_airplane(id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Routes
// ==================

async fn list_routes(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<RouteParams>,
) -> Result<Json<ListResponse<RouteView>>, ApiError> {
    state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;
    let filter = RouteFilter {
        from: params.from,
        to: params.to,
    };

    let listing = state
        .catalog
        .list_routes(&filter, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_route(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<RouteCreate>,
) -> Result<(StatusCode, Json<RouteView>), ApiError> {
    state.authorize_superuser(&headers)?;
    let route = state.catalog.create_route(request).map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn get_route(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteDetail>, ApiError> {
    state.authorize(&headers)?;
    let route = state.catalog.get_route(id).map_err(catalog_error)?;
    Ok(Json(route))
}

async fn update_route(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<RouteUpdate>,
) -> Result<Json<RouteView>, ApiError> {
    state.authorize_superuser(&headers)?;
    let route = state
        .catalog
        .update_route(id, patch)
        .map_err(catalog_error)?;
    Ok(Json(route))
}

async fn delete_route(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.authorize_superuser(&headers)?;
    state.catalog.delete_route(id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Crews
// ==================

async fn list_crews(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<CrewParams>,
) -> Result<Json<ListResponse<Crew>>, ApiError> {
    state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;
    let filter = CrewFilter {
        full_name: params.full_name,
    };

    let listing = state
        .catalog
        .list_crews(&filter, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_crew(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<CrewCreate>,
) -> Result<(StatusCode, Json<Crew>), ApiError> {
    state.authorize_superuser(&headers)?;
    let crew = state.catalog.create_crew(request).map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(crew)))
}

async fn get_crew(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Crew>, ApiError> {
    state.authorize(&headers)?;
    let crew = state.catalog.get_crew(id).map_err(catalog_error)?;
    Ok(Json(crew))
}

async fn update_crew(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<CrewUpdate>,
) -> Result<Json<Crew>, ApiError> {
    state.authorize_superuser(&headers)?;
    let crew = state.catalog.update_crew(id, patch).map_err(catalog_error)?;
    Ok(Json(crew))
}

async fn delete_crew(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.authorize_superuser(&headers)?;
    state.catalog.delete_crew(id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Flights
// ==================

async fn list_flights(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<FlightParams>,
) -> Result<Json<ListResponse<FlightView>>, ApiError> {
    state.authorize(&headers)?;
    let page = Page::new(params.limit, params.offset).map_err(catalog_error)?;
    let filter = FlightFilter {
        from: params.from,
        to: params.to,
        departure_time: params.departure_time,
        arrival_time: params.arrival_time,
        departure_after: params.departure_after,
        departure_before: params.departure_before,
    };

    let listing = state
        .catalog
        .list_flights(&filter, page)
        .map_err(catalog_error)?;
    Ok(Json(ListResponse::new(listing.total, listing.items)))
}

async fn create_flight(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(request): Json<FlightCreate>,
) -> Result<(StatusCode, Json<FlightView>), ApiError> {
    state.authorize_superuser(&headers)?;
    let flight = state.catalog.create_flight(request).map_err(catalog_error)?;
    Ok((StatusCode::CREATED, Json(flight)))
}

async fn get_flight(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<FlightDetail>, ApiError> {
    state.authorize(&headers)?;
    let flight = state.catalog.get_flight(id).map_err(catalog_error)?;
    Ok(Json(flight))
}

async fn update_flight(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<FlightUpdate>,
) -> Result<Json<FlightView>, ApiError> {
    state.authorize_superuser(&headers)?;
    let flight = state
        .catalog
        .update_flight(id, patch)
        .map_err(catalog_error)?;
    Ok(Json(flight))
}

async fn delete_flight(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.authorize_superuser(&headers)?;
    state.catalog.delete_flight(id).map_err(catalog_error)?;
    Ok(StatusCode::NO_CONTENT)
}
