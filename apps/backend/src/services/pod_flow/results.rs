use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{is_pod_admin, PodFlowService};
use crate::adapters::pods_sea::PodDeclaration;
use crate::domain::confirmation::{declaration_results, validate_turn_order};
use crate::entities::pods::PodOutcome;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{pod_players, pods, win_conditions};
use crate::services::activity::{self, AdminAction};

impl PodFlowService {
    /// Declare the pod's result: a winner (everyone else loses) or a draw.
    ///
    /// Only the creator or a pod admin may declare. Re-declaring on a
    /// PENDING pod overwrites the previous results and resets consensus;
    /// declaring on a COMPLETE pod is rejected.
    #[allow(clippy::too_many_arguments)]
    pub async fn declare_result(
        &self,
        txn: &DatabaseTransaction,
        pod_id: i64,
        actor_id: i64,
        winner_id: Option<i64>,
        win_condition_id: Option<i64>,
        turn_order: Option<&[i64]>,
    ) -> Result<pods::Pod, AppError> {
        debug!(pod_id, actor_id, ?winner_id, "Declaring pod result");

        let pod = pods::require_pod_for_update(txn, pod_id).await?;

        if pod.is_complete() {
            return Err(
                DomainError::state("Result of a finalized pod cannot be re-declared").into(),
            );
        }

        let actor_is_creator = pod.created_by == Some(actor_id);
        let actor_is_admin = is_pod_admin(txn, actor_id).await?;
        if !actor_is_creator && !actor_is_admin {
            return Err(DomainError::eligibility(
                "Only the pod creator or an admin may declare a result",
            )
            .into());
        }

        let participants = pod_players::find_all_by_pod(txn, pod_id).await?;
        let players: Vec<i64> = participants.iter().map(|p| p.player_id).collect();

        let results = declaration_results(&players, winner_id)?;

        // A win needs a recorded win condition; a draw carries one optionally.
        let win_condition_id = match (winner_id, win_condition_id) {
            (Some(_), None) => {
                return Err(DomainError::validation(
                    ValidationKind::WinConditionRequired,
                    "Declaring a winner requires a win condition",
                )
                .into());
            }
            (_, Some(id)) => {
                win_conditions::require_win_condition(txn, id).await?;
                Some(id)
            }
            (None, None) => None,
        };

        if let Some(order) = turn_order {
            validate_turn_order(&players, order)?;
        }

        for participant in &participants {
            let result = results
                .iter()
                .find(|(player_id, _)| *player_id == participant.player_id)
                .map(|(_, result)| *result);
            pod_players::set_result(txn, participant.id, result).await?;

            if let Some(order) = turn_order {
                let seat = order
                    .iter()
                    .position(|&p| p == participant.player_id)
                    .map(|i| i as i16);
                pod_players::set_turn_order(txn, participant.id, seat).await?;
            }
        }

        // Re-open consensus: everyone re-confirms, except the declarer when
        // they sit in the pod themselves.
        let declarer_in_pod = players.contains(&actor_id);
        pod_players::reset_confirmations(txn, pod_id, declarer_in_pod.then_some(actor_id)).await?;
        if declarer_in_pod {
            let declarer = pod_players::require_participant(txn, pod_id, actor_id).await?;
            pod_players::set_confirmed(txn, declarer.id, true).await?;
        }

        let outcome = if winner_id.is_some() {
            PodOutcome::Win
        } else {
            PodOutcome::Draw
        };
        let pod = pods::apply_declaration(
            txn,
            PodDeclaration {
                id: pod_id,
                outcome,
                win_condition_id,
            },
        )
        .await?;

        info!(pod_id, actor_id, ?winner_id, "Result declared, consensus reset");

        if actor_is_admin && !actor_is_creator {
            activity::record_pod_action(
                txn,
                actor_id,
                AdminAction::PodDeclare,
                pod_id,
                Some(serde_json::json!({ "winner_id": winner_id })),
            )
            .await?;
        }

        Ok(pod)
    }
}
