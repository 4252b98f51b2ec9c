use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub sub: String,
    pub username: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pod_players::Entity")]
    PodPlayers,
    #[sea_orm(has_many = "super::league_members::Entity")]
    LeagueMembers,
}

impl Related<super::pod_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PodPlayers.def()
    }
}

impl Related<super::league_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeagueMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
