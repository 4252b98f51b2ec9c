use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{is_pod_admin, PodFlowService};
use crate::adapters::pods_sea::PodCreate;
use crate::entities::leagues::LeagueStatus;
use crate::entities::pods::ConfirmStatus;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::domain::confirmation::{validate_roster, MAX_POD_PLAYERS};
use crate::repos::{league_members, leagues, pod_players, pods};

impl PodFlowService {
    /// Start a new pod in a league with an initial roster of 1-4 players.
    ///
    /// The creator must either play in the pod or hold the admin permission.
    pub async fn create_pod(
        &self,
        txn: &DatabaseTransaction,
        league_id: i64,
        creator_id: i64,
        player_ids: &[i64],
    ) -> Result<pods::Pod, AppError> {
        debug!(league_id, creator_id, players = player_ids.len(), "Creating pod");

        validate_roster(player_ids)?;

        let league = leagues::require_league(txn, league_id).await?;
        if league.status != LeagueStatus::Active {
            return Err(DomainError::validation(
                ValidationKind::LeagueNotActive,
                format!("League {league_id} is not accepting new pods"),
            )
            .into());
        }

        if !player_ids.contains(&creator_id) && !is_pod_admin(txn, creator_id).await? {
            return Err(DomainError::eligibility(
                "Creator must play in the pod or hold the admin permission",
            )
            .into());
        }

        for &player_id in player_ids {
            if !league_members::is_member(txn, league_id, player_id).await? {
                return Err(DomainError::validation(
                    ValidationKind::Other("NOT_ENROLLED".into()),
                    format!("Player {player_id} is not enrolled in league {league_id}"),
                )
                .into());
            }
        }

        let pod = pods::create_pod(
            txn,
            PodCreate {
                league_id,
                created_by: Some(creator_id),
            },
        )
        .await?;

        for &player_id in player_ids {
            pod_players::create_participant(
                txn,
                pod_players::ParticipantCreate::unconfirmed(pod.id, player_id),
            )
            .await?;
        }

        info!(pod_id = pod.id, league_id, creator_id, "Pod created");
        Ok(pod)
    }

    /// Join an open pod.
    pub async fn join_pod(
        &self,
        txn: &DatabaseTransaction,
        pod_id: i64,
        player_id: i64,
    ) -> Result<pod_players::Participant, AppError> {
        debug!(pod_id, player_id, "Joining pod");

        let pod = pods::require_pod_for_update(txn, pod_id).await?;

        if pod.confirm_status != ConfirmStatus::Open {
            return Err(DomainError::state(
                "Pod is no longer open: a result has already been declared",
            )
            .into());
        }

        let count = pod_players::count_by_pod(txn, pod_id).await?;
        if count as usize >= MAX_POD_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::PodFull,
                format!("Pod {pod_id} already holds {MAX_POD_PLAYERS} players"),
            )
            .into());
        }

        if pod_players::find_by_pod_and_player(txn, pod_id, player_id)
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                ValidationKind::AlreadyJoined,
                format!("Player {player_id} already joined pod {pod_id}"),
            )
            .into());
        }

        if !league_members::is_member(txn, pod.league_id, player_id).await? {
            return Err(DomainError::eligibility(format!(
                "Player {player_id} is not enrolled in league {}",
                pod.league_id
            ))
            .into());
        }

        // One open pod per player per league in normal flow
        if pod_players::exists_open_membership(txn, pod.league_id, player_id).await? {
            return Err(DomainError::validation(
                ValidationKind::AlreadyInOpenPod,
                format!(
                    "Player {player_id} already sits in an open pod of league {}",
                    pod.league_id
                ),
            )
            .into());
        }

        let participant = pod_players::create_participant(
            txn,
            pod_players::ParticipantCreate::unconfirmed(pod_id, player_id),
        )
        .await?;

        info!(pod_id, player_id, "Player joined pod");
        Ok(participant)
    }
}
