use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One edge of the role-inheritance DAG: `role_id` inherits everything
/// granted to `parent_role_id`. Cycle rejection happens before insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role_inherits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "role_id")]
    pub role_id: i64,
    #[sea_orm(column_name = "parent_role_id")]
    pub parent_role_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::RoleId",
        to = "super::roles::Column::Id"
    )]
    Role,
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::ParentRoleId",
        to = "super::roles::Column::Id"
    )]
    ParentRole,
}

impl ActiveModelBehavior for ActiveModel {}
