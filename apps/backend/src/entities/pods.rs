use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Pod lifecycle status. Kept in lockstep with [`ConfirmStatus`] by the
/// confirmation workflow: a pod is never COMPLETED while consensus is OPEN.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pod_status")]
pub enum PodStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Pod-level consensus state. OPEN → PENDING on declaration,
/// PENDING → COMPLETE on final confirmation (one-way).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pod_confirm_status")]
pub enum ConfirmStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "COMPLETE")]
    Complete,
}

/// Declared result summary for the pod as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pod_outcome")]
pub enum PodOutcome {
    #[sea_orm(string_value = "WIN")]
    Win,
    #[sea_orm(string_value = "DRAW")]
    Draw,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "league_id")]
    pub league_id: i64,
    #[sea_orm(column_name = "created_by")]
    pub created_by: Option<i64>,
    pub status: PodStatus,
    #[sea_orm(column_name = "confirm_status")]
    pub confirm_status: ConfirmStatus,
    pub outcome: Option<PodOutcome>,
    #[sea_orm(column_name = "win_condition_id")]
    pub win_condition_id: Option<i64>,
    #[sea_orm(column_name = "deleted_at")]
    pub deleted_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leagues::Entity",
        from = "Column::LeagueId",
        to = "super::leagues::Column::Id"
    )]
    League,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::win_conditions::Entity",
        from = "Column::WinConditionId",
        to = "super::win_conditions::Column::Id"
    )]
    WinCondition,
    #[sea_orm(has_many = "super::pod_players::Entity")]
    PodPlayers,
}

impl Related<super::leagues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::League.def()
    }
}

impl Related<super::pod_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PodPlayers.def()
    }
}

impl Related<super::win_conditions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WinCondition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
