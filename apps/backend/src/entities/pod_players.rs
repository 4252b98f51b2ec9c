use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A participant's declared individual result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "player_result")]
pub enum PlayerResult {
    #[sea_orm(string_value = "WIN")]
    Win,
    #[sea_orm(string_value = "LOSS")]
    Loss,
    #[sea_orm(string_value = "DRAW")]
    Draw,
    #[sea_orm(string_value = "DISQUALIFIED")]
    Disqualified,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pod_players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "pod_id")]
    pub pod_id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: i64,
    pub confirmed: bool,
    pub result: Option<PlayerResult>,
    /// Result held before a DQ toggle, so the toggle can restore it.
    #[sea_orm(column_name = "prior_result")]
    pub prior_result: Option<PlayerResult>,
    #[sea_orm(column_name = "turn_order", column_type = "SmallInteger", nullable)]
    pub turn_order: Option<i16>,
    #[sea_orm(column_name = "confirmed_at")]
    pub confirmed_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pods::Entity",
        from = "Column::PodId",
        to = "super::pods::Column::Id"
    )]
    Pod,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PlayerId",
        to = "super::users::Column::Id"
    )]
    Player,
}

impl Related<super::pods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pod.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
