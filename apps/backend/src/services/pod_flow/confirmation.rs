use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::PodFlowService;
use crate::domain::confirmation::{all_active_confirmed, counter_delta, ParticipantState};
use crate::entities::pods::{ConfirmStatus, PodStatus};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::{league_members, pod_players, pods};

impl PodFlowService {
    /// Record one participant's confirmation of the declared result.
    ///
    /// When the last active participant confirms, the same transaction flips
    /// the pod to COMPLETE and applies the standings counters. The pod row
    /// is locked for the whole read-modify-write, so two concurrent
    /// confirmations cannot both see "not yet all confirmed" and neither
    /// can the counters be applied twice.
    pub async fn confirm(
        &self,
        txn: &DatabaseTransaction,
        pod_id: i64,
        player_id: i64,
    ) -> Result<pods::Pod, AppError> {
        debug!(pod_id, player_id, "Confirming pod result");

        let pod = pods::require_pod_for_update(txn, pod_id).await?;
        let participant = pod_players::require_participant(txn, pod_id, player_id).await?;

        match pod.confirm_status {
            // Confirming a finalized pod is an idempotent no-op
            ConfirmStatus::Complete => return Ok(pod),
            ConfirmStatus::Open => {
                return Err(DomainError::state(
                    "No result has been declared for this pod yet",
                )
                .into());
            }
            ConfirmStatus::Pending => {}
        }

        pod_players::set_confirmed(txn, participant.id, true).await?;

        let participants = pod_players::find_all_by_pod(txn, pod_id).await?;
        let states: Vec<ParticipantState> = participants
            .iter()
            .map(|p| ParticipantState {
                player_id: p.player_id,
                confirmed: p.confirmed,
                result: p.result,
            })
            .collect();

        if all_active_confirmed(&states) {
            return self.finalize(txn, &pod, &participants).await;
        }

        info!(pod_id, player_id, "Confirmation recorded, consensus still pending");
        Ok(pod)
    }

    /// Flip the pod to COMPLETE/COMPLETED and apply standings counters.
    ///
    /// The caller holds the pod row lock and has verified the transition is
    /// legal; the status flip itself guards the counters, so they are
    /// applied exactly once per pod.
    pub(super) async fn finalize(
        &self,
        txn: &DatabaseTransaction,
        pod: &pods::Pod,
        participants: &[pod_players::Participant],
    ) -> Result<pods::Pod, AppError> {
        for participant in participants {
            let Some(result) = participant.result else {
                continue;
            };
            let delta = counter_delta(result);
            league_members::increment_counters(
                txn,
                pod.league_id,
                participant.player_id,
                delta.wins,
                delta.losses,
                delta.draws,
            )
            .await?;
        }

        let pod = pods::update_statuses(txn, pod.id, PodStatus::Completed, ConfirmStatus::Complete)
            .await?;

        info!(pod_id = pod.id, league_id = pod.league_id, "Pod finalized, standings updated");
        Ok(pod)
    }
}
