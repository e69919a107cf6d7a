use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::workflows::actor::Actor;
use crate::workflows::notify::NotificationPublisher;

use super::domain::{ListingId, ListingSubmission, MarketStatus, OwnerId};
use super::repository::{ListingRepository, RepositoryError};
use super::service::{ListingServiceError, ListingService};

/// Router builder exposing the listing intake, search, and moderation
/// endpoints.
pub fn listing_router<R, N>(service: Arc<ListingService<R, N>>) -> Router
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            post(submit_handler::<R, N>).get(search_handler::<R, N>),
        )
        .route(
            "/api/v1/listings/:listing_id",
            get(get_handler::<R, N>).delete(delete_handler::<R, N>),
        )
        .route(
            "/api/v1/listings/:listing_id/market-status",
            put(market_status_handler::<R, N>),
        )
        .route("/api/v1/my/listings", get(my_listings_handler::<R, N>))
        .route(
            "/api/v1/admin/listings/queue",
            get(queue_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/listings/rejected",
            get(rejected_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/listings/:listing_id/approve",
            post(approve_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/listings/:listing_id/reject",
            post(reject_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/listings/:listing_id/restore",
            post(restore_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/listings/import",
            post(import_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketStatusRequest {
    pub(crate) market_status: MarketStatus,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    axum::Json(submission): axum::Json<ListingSubmission>,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Query(query): Query<super::search::ListingQuery>,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.search(&query) {
        Ok(records) => {
            let listings: Vec<_> = records.iter().map(|record| record.summary()).collect();
            (StatusCode::OK, axum::Json(json!({ "listings": listings }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Path(listing_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.get(&actor, &ListingId(listing_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Path(listing_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.delete(&actor, &ListingId(listing_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn market_status_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Path(listing_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<MarketStatusRequest>,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.set_market_status(&actor, &ListingId(listing_id), request.market_status) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn my_listings_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    let Some(owner) = actor.user_id() else {
        return error_response(ListingServiceError::Forbidden);
    };

    match service.owner_listings(&OwnerId(owner.to_string())) {
        Ok(records) => {
            let listings: Vec<_> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(json!({ "listings": listings }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn queue_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.moderation_queue(&actor) {
        Ok(records) => {
            let listings: Vec<_> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(json!({ "listings": listings }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rejected_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.rejected_listings(&actor) {
        Ok(records) => {
            let listings: Vec<_> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(json!({ "listings": listings }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn approve_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Path(listing_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.approve(&actor, &ListingId(listing_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reject_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Path(listing_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.reject(&actor, &ListingId(listing_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn restore_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    Path(listing_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.restore(&actor, &ListingId(listing_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn import_handler<R, N>(
    State(service): State<Arc<ListingService<R, N>>>,
    headers: HeaderMap,
    body: String,
) -> Response
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.import(&actor, body.as_bytes()) {
        Ok(records) => {
            let ids: Vec<_> = records.iter().map(|record| record.id.0.clone()).collect();
            (
                StatusCode::CREATED,
                axum::Json(json!({ "imported": ids.len(), "listing_ids": ids })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(error: ListingServiceError) -> Response {
    let status = match &error {
        ListingServiceError::Validation(_) | ListingServiceError::Import(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ListingServiceError::Transition(_) => StatusCode::CONFLICT,
        ListingServiceError::Forbidden => StatusCode::FORBIDDEN,
        ListingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ListingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ListingServiceError::Repository(RepositoryError::Unavailable(_))
        | ListingServiceError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
