//! SeaORM adapter for the participant repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{pod_players, pods};

pub mod dto;

pub use dto::{ParticipantCreate, ParticipantUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_all_by_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<Vec<pod_players::Model>, sea_orm::DbErr> {
    pod_players::Entity::find()
        .filter(pod_players::Column::PodId.eq(pod_id))
        .order_by_asc(pod_players::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_pod_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    player_id: i64,
) -> Result<Option<pod_players::Model>, sea_orm::DbErr> {
    pod_players::Entity::find()
        .filter(pod_players::Column::PodId.eq(pod_id))
        .filter(pod_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

pub async fn count_by_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    pod_players::Entity::find()
        .filter(pod_players::Column::PodId.eq(pod_id))
        .count(conn)
        .await
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<pod_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let participant = pod_players::ActiveModel {
        id: NotSet,
        pod_id: Set(dto.pod_id),
        player_id: Set(dto.player_id),
        confirmed: Set(dto.confirmed),
        result: Set(dto.result),
        prior_result: NotSet,
        turn_order: Set(dto.turn_order),
        confirmed_at: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
    };

    participant.insert(conn).await
}

/// Overwrite one participant's declared result.
pub async fn set_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    result: Option<pod_players::PlayerResult>,
) -> Result<pod_players::Model, sea_orm::DbErr> {
    let participant = pod_players::ActiveModel {
        id: Set(id),
        pod_id: NotSet,
        player_id: NotSet,
        confirmed: NotSet,
        result: Set(result),
        prior_result: NotSet,
        turn_order: NotSet,
        confirmed_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
        created_at: NotSet,
    };
    participant.update(conn).await
}

/// Swap result and prior_result in one write (the DQ toggle).
pub async fn set_result_with_prior<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    result: Option<pod_players::PlayerResult>,
    prior_result: Option<pod_players::PlayerResult>,
) -> Result<pod_players::Model, sea_orm::DbErr> {
    let participant = pod_players::ActiveModel {
        id: Set(id),
        pod_id: NotSet,
        player_id: NotSet,
        confirmed: NotSet,
        result: Set(result),
        prior_result: Set(prior_result),
        turn_order: NotSet,
        confirmed_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
        created_at: NotSet,
    };
    participant.update(conn).await
}

pub async fn set_confirmed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    confirmed: bool,
) -> Result<pod_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let participant = pod_players::ActiveModel {
        id: Set(id),
        pod_id: NotSet,
        player_id: NotSet,
        confirmed: Set(confirmed),
        result: NotSet,
        prior_result: NotSet,
        turn_order: NotSet,
        confirmed_at: Set(confirmed.then_some(now)),
        updated_at: Set(now),
        created_at: NotSet,
    };
    participant.update(conn).await
}

pub async fn set_turn_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    turn_order: Option<i16>,
) -> Result<pod_players::Model, sea_orm::DbErr> {
    let participant = pod_players::ActiveModel {
        id: Set(id),
        pod_id: NotSet,
        player_id: NotSet,
        confirmed: NotSet,
        result: NotSet,
        prior_result: NotSet,
        turn_order: Set(turn_order),
        confirmed_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
        created_at: NotSet,
    };
    participant.update(conn).await
}

/// Reset every confirmation flag in the pod, optionally sparing one player
/// (the declarer keeps their implicit confirmation on re-declaration).
pub async fn reset_confirmations<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    except_player_id: Option<i64>,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();
    let mut update = pod_players::Entity::update_many()
        .col_expr(pod_players::Column::Confirmed, Expr::val(false).into())
        .col_expr(
            pod_players::Column::ConfirmedAt,
            Expr::val(None::<time::OffsetDateTime>).into(),
        )
        .col_expr(pod_players::Column::UpdatedAt, Expr::val(now).into())
        .filter(pod_players::Column::PodId.eq(pod_id));
    if let Some(player_id) = except_player_id {
        update = update.filter(pod_players::Column::PlayerId.ne(player_id));
    }
    update.exec(conn).await?;
    Ok(())
}

/// Partial admin update of a single row.
pub async fn update_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: ParticipantUpdate,
) -> Result<pod_players::Model, sea_orm::DbErr> {
    let participant = pod_players::ActiveModel {
        id: Set(id),
        pod_id: NotSet,
        player_id: NotSet,
        confirmed: match dto.confirmed {
            Some(c) => Set(c),
            None => NotSet,
        },
        result: match dto.result {
            Some(r) => Set(r),
            None => NotSet,
        },
        prior_result: match dto.prior_result {
            Some(r) => Set(r),
            None => NotSet,
        },
        turn_order: match dto.turn_order {
            Some(t) => Set(t),
            None => NotSet,
        },
        confirmed_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
        created_at: NotSet,
    };
    participant.update(conn).await
}

pub async fn delete_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), sea_orm::DbErr> {
    pod_players::Entity::delete_many()
        .filter(pod_players::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn delete_all_by_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<(), sea_orm::DbErr> {
    pod_players::Entity::delete_many()
        .filter(pod_players::Column::PodId.eq(pod_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Does the player already sit in an open (non-deleted, non-complete) pod
/// of this league? Enforced by the join operation, not by the table.
pub async fn exists_open_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    player_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = pod_players::Entity::find()
        .join(JoinType::InnerJoin, pod_players::Relation::Pod.def())
        .filter(pod_players::Column::PlayerId.eq(player_id))
        .filter(pods::Column::LeagueId.eq(league_id))
        .filter(pods::Column::DeletedAt.is_null())
        .filter(pods::Column::ConfirmStatus.ne(pods::ConfirmStatus::Complete))
        .count(conn)
        .await?;
    Ok(count > 0)
}
