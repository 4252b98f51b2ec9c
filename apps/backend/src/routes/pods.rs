//! Pod HTTP routes: creation, join, result declaration, confirmation,
//! deletion and league listings.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::pod_id::PodId;
use crate::entities::pods::{ConfirmStatus, PodOutcome, PodStatus};
use crate::repos::{pod_players, pods};
use crate::services::pod_flow::PodFlowService;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ParticipantView {
    pub player_id: i64,
    pub confirmed: bool,
    pub result: Option<crate::entities::pod_players::PlayerResult>,
    pub turn_order: Option<i16>,
    pub confirmed_at: Option<time::OffsetDateTime>,
}

impl From<pod_players::Participant> for ParticipantView {
    fn from(p: pod_players::Participant) -> Self {
        Self {
            player_id: p.player_id,
            confirmed: p.confirmed,
            result: p.result,
            turn_order: p.turn_order,
            confirmed_at: p.confirmed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PodView {
    pub id: i64,
    pub league_id: i64,
    pub created_by: Option<i64>,
    pub status: PodStatus,
    pub confirm_status: ConfirmStatus,
    pub outcome: Option<PodOutcome>,
    pub win_condition_id: Option<i64>,
    pub created_at: time::OffsetDateTime,
    pub participants: Vec<ParticipantView>,
}

/// Assemble the public view of a pod and its participants.
pub(crate) async fn pod_view(
    txn: &DatabaseTransaction,
    pod: pods::Pod,
) -> Result<PodView, AppError> {
    let participants = pod_players::find_all_by_pod(txn, pod.id).await?;
    Ok(PodView {
        id: pod.id,
        league_id: pod.league_id,
        created_by: pod.created_by,
        status: pod.status,
        confirm_status: pod.confirm_status,
        outcome: pod.outcome,
        win_condition_id: pod.win_condition_id,
        created_at: pod.created_at,
        participants: participants.into_iter().map(ParticipantView::from).collect(),
    })
}

#[derive(Debug, Deserialize)]
struct CreatePodRequest {
    league_id: i64,
    player_ids: Vec<i64>,
}

/// POST /api/pods
async fn create_pod(
    http_req: HttpRequest,
    user: CurrentUser,
    body: web::Json<CreatePodRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, request.league_id, user.id, &request.player_ids)
                .await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(view))
}

/// GET /api/pods/{pod_id}
async fn get_pod(
    http_req: HttpRequest,
    pod_id: PodId,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let id = pod_id.0;

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let pod = pods::require_pod(txn, id).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

/// POST /api/pods/{pod_id}/join
async fn join_pod(
    http_req: HttpRequest,
    pod_id: PodId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let id = pod_id.0;

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            service.join_pod(txn, id, user.id).await?;
            let pod = pods::require_pod(txn, id).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

#[derive(Debug, Deserialize)]
struct DeclareResultRequest {
    winner_id: Option<i64>,
    win_condition_id: Option<i64>,
    turn_order: Option<Vec<i64>>,
}

/// PUT /api/pods/{pod_id}/result
async fn declare_result(
    http_req: HttpRequest,
    pod_id: PodId,
    user: CurrentUser,
    body: web::Json<DeclareResultRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let id = pod_id.0;
    let request = body.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            let pod = service
                .declare_result(
                    txn,
                    id,
                    user.id,
                    request.winner_id,
                    request.win_condition_id,
                    request.turn_order.as_deref(),
                )
                .await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

/// POST /api/pods/{pod_id}/confirm
async fn confirm_result(
    http_req: HttpRequest,
    pod_id: PodId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PodView>, AppError> {
    let id = pod_id.0;

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = PodFlowService::new();
            let pod = service.confirm(txn, id, user.id).await?;
            pod_view(txn, pod).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

/// DELETE /api/pods/{pod_id}
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
            service.delete_pod(txn, id, user.id).await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
struct LeaguePodsQuery {
    status: Option<String>,
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<PodStatus>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Some(PodStatus::Active)),
            "pending" => Ok(Some(PodStatus::Pending)),
            "completed" => Ok(Some(PodStatus::Completed)),
            other => Err(AppError::validation(
                ErrorCode::BadRequest,
                format!("Unknown status filter: {other}"),
            )),
        },
    }
}

/// GET /api/pods/league/{league_id}?status=
async fn list_league_pods(
    http_req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<LeaguePodsQuery>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<PodView>>, AppError> {
    let league_id = path.into_inner();
    if league_id <= 0 {
        return Err(AppError::validation(
            ErrorCode::InvalidLeagueId,
            format!("League id must be positive, got: {league_id}"),
        ));
    }
    let status = parse_status_filter(query.status.as_deref())?;

    let views = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let pods = pods::find_all_by_league(txn, league_id, status).await?;
            let mut views = Vec::with_capacity(pods.len());
            for pod in pods {
                views.push(pod_view(txn, pod).await?);
            }
            Ok(views)
        })
    })
    .await?;

    Ok(web::Json(views))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // "/league/..." is registered before "/{pod_id}" so the literal segment wins
    cfg.service(web::resource("/league/{league_id}").route(web::get().to(list_league_pods)));
    cfg.service(web::resource("").route(web::post().to(create_pod)));
    cfg.service(
        web::resource("/{pod_id}")
            .route(web::get().to(get_pod))
            .route(web::delete().to(delete_pod)),
    );
    cfg.service(web::resource("/{pod_id}/join").route(web::post().to(join_pod)));
    cfg.service(web::resource("/{pod_id}/result").route(web::put().to(declare_result)));
    cfg.service(web::resource("/{pod_id}/confirm").route(web::post().to(confirm_result)));
}

#[cfg(test)]
mod tests {
    use super::parse_status_filter;
    use crate::entities::pods::PodStatus;

    #[test]
    fn status_filter_parses_known_values() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("active")).unwrap(),
            Some(PodStatus::Active)
        );
        assert_eq!(
            parse_status_filter(Some("COMPLETED")).unwrap(),
            Some(PodStatus::Completed)
        );
        assert!(parse_status_filter(Some("bogus")).is_err());
    }
}
