use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Query, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Leagues {
    Table,
    Id,
    Name,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum LeagueMembers {
    Table,
    Id,
    LeagueId,
    UserId,
    Wins,
    Losses,
    Draws,
    JoinedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WinConditions {
    Table,
    Id,
    Name,
    Slug,
    CreatedAt,
}

#[derive(Iden)]
enum Pods {
    Table,
    Id,
    LeagueId,
    CreatedBy,
    Status,
    ConfirmStatus,
    Outcome,
    WinConditionId,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PodPlayers {
    Table,
    Id,
    PodId,
    PlayerId,
    Confirmed,
    Result,
    PriorResult,
    TurnOrder,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum RoleInherits {
    Table,
    Id,
    RoleId,
    ParentRoleId,
}

#[derive(Iden)]
enum RoleGrants {
    Table,
    Id,
    RoleId,
    Permission,
}

#[derive(Iden)]
enum UserRoles {
    Table,
    Id,
    UserId,
    RoleId,
}

#[derive(Iden)]
enum ActivityLog {
    Table,
    Id,
    ActorId,
    Action,
    TargetKind,
    TargetId,
    Detail,
    CreatedAt,
}

#[derive(Iden)]
enum LeagueStatusEnum {
    #[iden = "league_status"]
    Type,
}

#[derive(Iden)]
enum PodStatusEnum {
    #[iden = "pod_status"]
    Type,
}

#[derive(Iden)]
enum PodConfirmStatusEnum {
    #[iden = "pod_confirm_status"]
    Type,
}

#[derive(Iden)]
enum PodOutcomeEnum {
    #[iden = "pod_outcome"]
    Type,
}

#[derive(Iden)]
enum PlayerResultEnum {
    #[iden = "player_result"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Postgres enum types (SQLite stores them as TEXT)
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                async fn enum_exists(
                    manager: &SchemaManager<'_>,
                    enum_name: &str,
                ) -> Result<bool, DbErr> {
                    let result = manager
                        .get_connection()
                        .query_one(Statement::from_string(
                            sea_orm::DatabaseBackend::Postgres,
                            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                        ))
                        .await?;
                    Ok(result.is_some())
                }

                if !enum_exists(manager, "league_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(LeagueStatusEnum::Type)
                                .values(["ACTIVE", "CLOSED"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "pod_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PodStatusEnum::Type)
                                .values(["ACTIVE", "PENDING", "COMPLETED"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "pod_confirm_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PodConfirmStatusEnum::Type)
                                .values(["OPEN", "PENDING", "COMPLETE"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "pod_outcome").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PodOutcomeEnum::Type)
                                .values(["WIN", "DRAW"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "player_result").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(PlayerResultEnum::Type)
                                .values(["WIN", "LOSS", "DRAW", "DISQUALIFIED"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite doesn't need enum types - they're stored as TEXT
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // leagues
        manager
            .create_table(
                Table::create()
                    .table(Leagues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leagues::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Leagues::Name).string().not_null())
                    .col(
                        ColumnDef::new(Leagues::Status)
                            .custom(LeagueStatusEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Leagues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Leagues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // league_members
        manager
            .create_table(
                Table::create()
                    .table(LeagueMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeagueMembers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(LeagueMembers::LeagueId).big_integer().not_null())
                    .col(ColumnDef::new(LeagueMembers::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(LeagueMembers::Wins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeagueMembers::Losses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeagueMembers::Draws)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeagueMembers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeagueMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_members_league_id")
                            .from(LeagueMembers::Table, LeagueMembers::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_members_user_id")
                            .from(LeagueMembers::Table, LeagueMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_league_members_league_user")
                    .table(LeagueMembers::Table)
                    .col(LeagueMembers::LeagueId)
                    .col(LeagueMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // win_conditions
        manager
            .create_table(
                Table::create()
                    .table(WinConditions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WinConditions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(WinConditions::Name).string().not_null())
                    .col(
                        ColumnDef::new(WinConditions::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WinConditions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // pods
        manager
            .create_table(
                Table::create()
                    .table(Pods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pods::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Pods::LeagueId).big_integer().not_null())
                    .col(ColumnDef::new(Pods::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Pods::Status)
                            .custom(PodStatusEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pods::ConfirmStatus)
                            .custom(PodConfirmStatusEnum::Type)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pods::Outcome).custom(PodOutcomeEnum::Type).null())
                    .col(ColumnDef::new(Pods::WinConditionId).big_integer().null())
                    .col(ColumnDef::new(Pods::DeletedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Pods::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pods::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pods_league_id")
                            .from(Pods::Table, Pods::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pods_created_by")
                            .from(Pods::Table, Pods::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pods_win_condition_id")
                            .from(Pods::Table, Pods::WinConditionId)
                            .to(WinConditions::Table, WinConditions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pods_league_id")
                    .table(Pods::Table)
                    .col(Pods::LeagueId)
                    .to_owned(),
            )
            .await?;

        // pod_players
        manager
            .create_table(
                Table::create()
                    .table(PodPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PodPlayers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(PodPlayers::PodId).big_integer().not_null())
                    .col(ColumnDef::new(PodPlayers::PlayerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PodPlayers::Confirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PodPlayers::Result)
                            .custom(PlayerResultEnum::Type)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PodPlayers::PriorResult)
                            .custom(PlayerResultEnum::Type)
                            .null(),
                    )
                    .col(ColumnDef::new(PodPlayers::TurnOrder).small_integer().null())
                    .col(
                        ColumnDef::new(PodPlayers::ConfirmedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PodPlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PodPlayers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pod_players_pod_id")
                            .from(PodPlayers::Table, PodPlayers::PodId)
                            .to(Pods::Table, Pods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pod_players_player_id")
                            .from(PodPlayers::Table, PodPlayers::PlayerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_pod_players_pod_player")
                    .table(PodPlayers::Table)
                    .col(PodPlayers::PodId)
                    .col(PodPlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // roles
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Roles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // role_inherits: edges of the role-inheritance DAG
        manager
            .create_table(
                Table::create()
                    .table(RoleInherits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoleInherits::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoleInherits::RoleId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoleInherits::ParentRoleId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_inherits_role_id")
                            .from(RoleInherits::Table, RoleInherits::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_inherits_parent_role_id")
                            .from(RoleInherits::Table, RoleInherits::ParentRoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_role_inherits_role_parent")
                    .table(RoleInherits::Table)
                    .col(RoleInherits::RoleId)
                    .col(RoleInherits::ParentRoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // role_grants
        manager
            .create_table(
                Table::create()
                    .table(RoleGrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoleGrants::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoleGrants::RoleId).big_integer().not_null())
                    .col(ColumnDef::new(RoleGrants::Permission).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_grants_role_id")
                            .from(RoleGrants::Table, RoleGrants::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_role_grants_role_permission")
                    .table(RoleGrants::Table)
                    .col(RoleGrants::RoleId)
                    .col(RoleGrants::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // user_roles
        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRoles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(UserRoles::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user_id")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role_id")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_user_roles_user_role")
                    .table(UserRoles::Table)
                    .col(UserRoles::UserId)
                    .col(UserRoles::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // activity_log
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLog::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(ActivityLog::ActorId).big_integer().null())
                    .col(ColumnDef::new(ActivityLog::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLog::TargetKind).string().not_null())
                    .col(ColumnDef::new(ActivityLog::TargetId).big_integer().not_null())
                    .col(ColumnDef::new(ActivityLog::Detail).json_binary().null())
                    .col(
                        ColumnDef::new(ActivityLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_log_actor_id")
                            .from(ActivityLog::Table, ActivityLog::ActorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_log_target")
                    .table(ActivityLog::Table)
                    .col(ActivityLog::TargetKind)
                    .col(ActivityLog::TargetId)
                    .to_owned(),
            )
            .await?;

        // Seed the win condition catalogue
        let seed = Query::insert()
            .into_table(WinConditions::Table)
            .columns([WinConditions::Name, WinConditions::Slug, WinConditions::CreatedAt])
            .values_panic(["Combat damage".into(), "combat-damage".into(), Expr::current_timestamp().into()])
            .values_panic(["Commander damage".into(), "commander-damage".into(), Expr::current_timestamp().into()])
            .values_panic(["Poison".into(), "poison".into(), Expr::current_timestamp().into()])
            .values_panic(["Mill".into(), "mill".into(), Expr::current_timestamp().into()])
            .values_panic(["Alternate win condition".into(), "alt-win".into(), Expr::current_timestamp().into()])
            .values_panic(["Concession".into(), "concession".into(), Expr::current_timestamp().into()])
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLog::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoleGrants::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoleInherits::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PodPlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pods::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WinConditions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeagueMembers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leagues::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            for type_name in [
                "player_result",
                "pod_outcome",
                "pod_confirm_status",
                "pod_status",
                "league_status",
            ] {
                manager
                    .get_connection()
                    .execute(Statement::from_string(
                        sea_orm::DatabaseBackend::Postgres,
                        format!("DROP TYPE IF EXISTS {type_name}"),
                    ))
                    .await?;
            }
        }

        Ok(())
    }
}
