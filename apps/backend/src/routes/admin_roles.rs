//! Role administration routes: roles, permission grants, inheritance edges
//! and user assignments. Inheritance writes run the cycle check first.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use sea_orm::DatabaseTransaction;
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::current_user::CurrentUser;
use crate::permissions::{self, ROLES_ADMIN};
use crate::repos::roles;
use crate::state::app_state::AppState;

async fn require_roles_admin(txn: &DatabaseTransaction, user_id: i64) -> Result<(), AppError> {
    if permissions::has_permission(txn, user_id, ROLES_ADMIN).await? {
        Ok(())
    } else {
        Err(DomainError::eligibility(format!(
            "User {user_id} does not hold the {ROLES_ADMIN} permission"
        ))
        .into())
    }
}

#[derive(Debug, Deserialize)]
struct CreateRoleRequest {
    name: String,
}

/// POST /api/admin/roles
async fn create_role(
    http_req: HttpRequest,
    user: CurrentUser,
    body: web::Json<CreateRoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;

    let role = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            require_roles_admin(txn, user.id).await?;
            Ok(roles::create_role(txn, &name).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(role))
}

#[derive(Debug, Deserialize)]
struct AddInheritanceRequest {
    parent_role_id: i64,
}

/// POST /api/admin/roles/{role_id}/inherits
async fn add_inheritance(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    body: web::Json<AddInheritanceRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let role_id = path.into_inner();
    let parent_role_id = body.into_inner().parent_role_id;

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            require_roles_admin(txn, user.id).await?;
            Ok(permissions::add_inheritance(txn, role_id, parent_role_id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
struct AddGrantRequest {
    permission: String,
}

/// POST /api/admin/roles/{role_id}/grants
async fn add_grant(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    body: web::Json<AddGrantRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let role_id = path.into_inner();
    let permission = body.into_inner().permission;

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            require_roles_admin(txn, user.id).await?;
            roles::require_role(txn, role_id).await?;
            Ok(roles::create_grant(txn, role_id, &permission).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
struct AssignRoleRequest {
    user_id: i64,
}

/// POST /api/admin/roles/{role_id}/assign
async fn assign_role(
    http_req: HttpRequest,
    path: web::Path<i64>,
    user: CurrentUser,
    body: web::Json<AssignRoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let role_id = path.into_inner();
    let target_user_id = body.into_inner().user_id;

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            require_roles_admin(txn, user.id).await?;
            roles::require_role(txn, role_id).await?;
            crate::repos::users::require_user(txn, target_user_id).await?;
            Ok(roles::assign_role(txn, target_user_id, role_id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_role)));
    cfg.service(web::resource("/{role_id}/inherits").route(web::post().to(add_inheritance)));
    cfg.service(web::resource("/{role_id}/grants").route(web::post().to(add_grant)));
    cfg.service(web::resource("/{role_id}/assign").route(web::post().to(assign_role)));
}
