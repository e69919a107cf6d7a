use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::workflows::actor::Actor;
use crate::workflows::notify::NotificationPublisher;

use super::domain::{KycRequest, UserId, VerificationSnapshot};
use super::repository::{KycRepository, KycRepositoryError};
use super::service::{KycService, KycServiceError};

/// Router builder exposing the KYC submission, review, and trust endpoints.
pub fn kyc_router<R, N>(service: Arc<KycService<R, N>>) -> Router
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/kyc", post(submit_handler::<R, N>))
        .route("/api/v1/kyc/:user_id", get(status_handler::<R, N>))
        .route(
            "/api/v1/kyc/:user_id/trust-score",
            post(trust_score_handler::<R, N>),
        )
        .route("/api/v1/admin/kyc/queue", get(queue_handler::<R, N>))
        .route(
            "/api/v1/admin/kyc/:user_id/approve",
            post(approve_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/kyc/:user_id/reject",
            post(reject_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectRequest {
    pub(crate) reason: String,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<KycService<R, N>>>,
    axum::Json(request): axum::Json<KycRequest>,
) -> Response
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<KycService<R, N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.status(&UserId(user_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn trust_score_handler<R, N>(
    State(service): State<Arc<KycService<R, N>>>,
    Path(user_id): Path<String>,
    axum::Json(snapshot): axum::Json<VerificationSnapshot>,
) -> Response
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.trust_score(&UserId(user_id), snapshot) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn queue_handler<R, N>(
    State(service): State<Arc<KycService<R, N>>>,
    headers: HeaderMap,
) -> Response
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.review_queue(&actor) {
        Ok(records) => {
            let submissions: Vec<_> = records.iter().map(|record| record.view()).collect();
            (
                StatusCode::OK,
                axum::Json(json!({ "submissions": submissions })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn approve_handler<R, N>(
    State(service): State<Arc<KycService<R, N>>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.approve(&actor, &UserId(user_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reject_handler<R, N>(
    State(service): State<Arc<KycService<R, N>>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<RejectRequest>,
) -> Response
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let actor = Actor::from_headers(&headers);
    match service.reject(&actor, &UserId(user_id), request.reason) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(error: KycServiceError) -> Response {
    let status = match &error {
        KycServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        KycServiceError::Review(_) => StatusCode::CONFLICT,
        KycServiceError::Forbidden => StatusCode::FORBIDDEN,
        KycServiceError::Repository(KycRepositoryError::NotFound) => StatusCode::NOT_FOUND,
        KycServiceError::Repository(KycRepositoryError::Unavailable(_))
        | KycServiceError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
