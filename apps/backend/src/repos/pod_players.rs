//! Participant repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::pod_players_sea as participants_adapter;
use crate::entities::pod_players;
use crate::entities::pod_players::PlayerResult;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use participants_adapter::{ParticipantCreate, ParticipantUpdate};

/// Participant domain model: one player's membership and result within a pod.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i64,
    pub pod_id: i64,
    pub player_id: i64,
    pub confirmed: bool,
    pub result: Option<PlayerResult>,
    pub prior_result: Option<PlayerResult>,
    pub turn_order: Option<i16>,
    pub confirmed_at: Option<time::OffsetDateTime>,
}

impl Participant {
    /// Disqualified participants are excluded from the consensus check.
    pub fn is_active(&self) -> bool {
        self.result != Some(PlayerResult::Disqualified)
    }
}

pub async fn find_all_by_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let rows = participants_adapter::find_all_by_pod(conn, pod_id).await?;
    Ok(rows.into_iter().map(Participant::from).collect())
}

pub async fn find_by_pod_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    player_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let row = participants_adapter::find_by_pod_and_player(conn, pod_id, player_id).await?;
    Ok(row.map(Participant::from))
}

/// Find a participant or return a domain NotFound.
pub async fn require_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    player_id: i64,
) -> Result<Participant, DomainError> {
    find_by_pod_and_player(conn, pod_id, player_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Participant,
                format!("Player {player_id} is not a participant of pod {pod_id}"),
            )
        })
}

pub async fn count_by_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<u64, DomainError> {
    Ok(participants_adapter::count_by_pod(conn, pod_id).await?)
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::create_participant(conn, dto).await?;
    Ok(Participant::from(row))
}

pub async fn set_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    result: Option<PlayerResult>,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::set_result(conn, id, result).await?;
    Ok(Participant::from(row))
}

pub async fn set_result_with_prior<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    result: Option<PlayerResult>,
    prior_result: Option<PlayerResult>,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::set_result_with_prior(conn, id, result, prior_result).await?;
    Ok(Participant::from(row))
}

pub async fn set_confirmed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    confirmed: bool,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::set_confirmed(conn, id, confirmed).await?;
    Ok(Participant::from(row))
}

pub async fn set_turn_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    turn_order: Option<i16>,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::set_turn_order(conn, id, turn_order).await?;
    Ok(Participant::from(row))
}

pub async fn reset_confirmations<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    except_player_id: Option<i64>,
) -> Result<(), DomainError> {
    participants_adapter::reset_confirmations(conn, pod_id, except_player_id).await?;
    Ok(())
}

pub async fn update_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: ParticipantUpdate,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::update_participant(conn, id, dto).await?;
    Ok(Participant::from(row))
}

pub async fn delete_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    participants_adapter::delete_participant(conn, id).await?;
    Ok(())
}

pub async fn delete_all_by_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<(), DomainError> {
    participants_adapter::delete_all_by_pod(conn, pod_id).await?;
    Ok(())
}

pub async fn exists_open_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    player_id: i64,
) -> Result<bool, DomainError> {
    Ok(participants_adapter::exists_open_membership(conn, league_id, player_id).await?)
}

impl From<pod_players::Model> for Participant {
    fn from(model: pod_players::Model) -> Self {
        Self {
            id: model.id,
            pod_id: model.pod_id,
            player_id: model.player_id,
            confirmed: model.confirmed,
            result: model.result,
            prior_result: model.prior_result,
            turn_order: model.turn_order,
            confirmed_at: model.confirmed_at,
        }
    }
}
