//! Row factories for integration tests.
//!
//! Subs, league names and role names are uniquified per call so concurrent
//! test transactions never contend on unique indexes.

use backend::entities::leagues::LeagueStatus;
use backend::entities::{leagues, users, win_conditions};
use backend::errors::domain::DomainError;
use backend::permissions::POD_ADMIN;
use backend::repos::{league_members, leagues as leagues_repo, roles, users as users_repo, win_conditions as win_conditions_repo};
use sea_orm::DatabaseTransaction;
use uuid::Uuid;

pub struct LeagueSetup {
    pub league: leagues::Model,
    pub players: Vec<users::Model>,
}

impl LeagueSetup {
    pub fn player_ids(&self) -> Vec<i64> {
        self.players.iter().map(|p| p.id).collect()
    }
}

pub async fn user(txn: &DatabaseTransaction, tag: &str) -> Result<users::Model, DomainError> {
    let sub = format!("test-{tag}-{}", Uuid::new_v4());
    users_repo::create_user(txn, &sub, Some(tag)).await
}

/// An active league with `player_count` enrolled members.
pub async fn league_with_members(
    txn: &DatabaseTransaction,
    player_count: usize,
) -> Result<LeagueSetup, DomainError> {
    let name = format!("Test League {}", Uuid::new_v4());
    let league = leagues_repo::create_league(txn, &name, LeagueStatus::Active).await?;

    let mut players = Vec::with_capacity(player_count);
    for i in 0..player_count {
        let player = user(txn, &format!("player{i}")).await?;
        league_members::create_membership(txn, league.id, player.id).await?;
        players.push(player);
    }

    Ok(LeagueSetup { league, players })
}

/// A user enrolled in an existing league.
pub async fn enrolled_user(
    txn: &DatabaseTransaction,
    league_id: i64,
    tag: &str,
) -> Result<users::Model, DomainError> {
    let player = user(txn, tag).await?;
    league_members::create_membership(txn, league_id, player.id).await?;
    Ok(player)
}

/// Grant the pod admin permission to a user through a fresh role.
pub async fn grant_pod_admin(
    txn: &DatabaseTransaction,
    user_id: i64,
) -> Result<(), DomainError> {
    let role = roles::create_role(txn, &format!("pod-admin-{}", Uuid::new_v4())).await?;
    roles::create_grant(txn, role.id, POD_ADMIN).await?;
    roles::assign_role(txn, user_id, role.id).await
}

/// The seeded combat damage win condition.
pub async fn combat_damage(
    txn: &DatabaseTransaction,
) -> Result<win_conditions::Model, DomainError> {
    win_conditions_repo::find_by_slug(txn, "combat-damage")
        .await?
        .ok_or_else(|| {
            DomainError::infra(
                backend::errors::domain::InfraErrorKind::DataCorruption,
                "seeded win condition missing",
            )
        })
}
