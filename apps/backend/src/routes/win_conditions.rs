//! Win condition catalogue, consumed by result-declaration forms.

use actix_web::{web, HttpRequest, Result};

use crate::db::txn::with_txn;
use crate::entities::win_conditions;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::win_conditions as win_conditions_repo;
use crate::state::app_state::AppState;

/// GET /api/win-conditions
async fn list_win_conditions(
    http_req: HttpRequest,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<win_conditions::Model>>, AppError> {
    let conditions = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(win_conditions_repo::find_all(txn).await?) })
    })
    .await?;

    Ok(web::Json(conditions))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_win_conditions)));
}
