use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "league_status")]
pub enum LeagueStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leagues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub status: LeagueStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pods::Entity")]
    Pods,
    #[sea_orm(has_many = "super::league_members::Entity")]
    LeagueMembers,
}

impl Related<super::pods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pods.def()
    }
}

impl Related<super::league_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeagueMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
