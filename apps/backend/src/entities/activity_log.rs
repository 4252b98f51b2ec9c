use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Audit record for privileged mutations: who did what to which target.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "actor_id")]
    pub actor_id: Option<i64>,
    pub action: String,
    #[sea_orm(column_name = "target_kind")]
    pub target_kind: String,
    #[sea_orm(column_name = "target_id")]
    pub target_id: i64,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub detail: Option<Json>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ActorId",
        to = "super::users::Column::Id"
    )]
    Actor,
}

impl ActiveModelBehavior for ActiveModel {}
