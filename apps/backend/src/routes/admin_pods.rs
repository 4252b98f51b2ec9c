//! Admin pod routes. The service verifies the `pods.admin` permission on
//! every call; these handlers only shape requests and responses.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::pod_players::PlayerResult;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::pod_id::PodId;
use crate::routes::pods::{pod_view, PodView};
use crate::services::pod_flow::{AdminPodUpdate, PodFlowService};
use crate::state::app_state::AppState;

/// PUT /api/admin/pods/{pod_id}
async fn update_pod(
    http_req: HttpRequest,
    pod_id: PodId,
    user: CurrentUser,
    body: web::Json<AdminPodUpdate>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let id = pod_id.0;
    let update = body.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            let pod = service.admin_update_pod(txn, user.id, id, update).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

/// DELETE /api/admin/pods/{pod_id}
async fn delete_pod(
    http_req: HttpRequest,
    pod_id: PodId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = pod_id.0;

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            service.admin_delete_pod(txn, user.id, id).await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
struct AddParticipantRequest {
    player_id: i64,
}

/// POST /api/admin/pods/{pod_id}/participants
async fn add_participant(
    http_req: HttpRequest,
    pod_id: PodId,
    user: CurrentUser,
    body: web::Json<AddParticipantRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let id = pod_id.0;
    let player_id = body.player_id;

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            service.admin_add_participant(txn, user.id, id, player_id).await?;
            let pod = crate::repos::pods::require_pod(txn, id).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

/// DELETE /api/admin/pods/{pod_id}/participants/{player_id}
async fn remove_participant(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (pod_id, player_id) = path.into_inner();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            service
                .admin_remove_participant(txn, user.id, pod_id, player_id)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
struct UpdateParticipantRequest {
    result: Option<PlayerResult>,
}

/// PUT /api/admin/pods/{pod_id}/participants/{player_id}
async fn update_participant(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    user: CurrentUser,
    body: web::Json<UpdateParticipantRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let (pod_id, player_id) = path.into_inner();
    let result = body.into_inner().result;

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            service
                .admin_update_participant(txn, user.id, pod_id, player_id, result)
                .await?;
            let pod = crate::repos::pods::require_pod(txn, pod_id).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

/// PATCH /api/admin/pods/{pod_id}/participants/{player_id}/dq
async fn toggle_disqualified(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let (pod_id, player_id) = path.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            service
                .admin_toggle_disqualified(txn, user.id, pod_id, player_id)
                .await?;
            let pod = crate::repos::pods::require_pod(txn, pod_id).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{pod_id}")
            .route(web::put().to(update_pod))
            .route(web::delete().to(delete_pod)),
    );
    cfg.service(web::resource("/{pod_id}/participants").route(web::post().to(add_participant)));
    cfg.service(
        web::resource("/{pod_id}/participants/{player_id}")
            .route(web::put().to(update_participant))
            .route(web::delete().to(remove_participant)),
    );
    cfg.service(
        web::resource("/{pod_id}/participants/{player_id}/dq")
            .route(web::patch().to(toggle_disqualified)),
    );
}
