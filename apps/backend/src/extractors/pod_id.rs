use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Pod ID extracted from the route path parameter.
///
/// Validates shape only; existence is checked by the service under the
/// transaction that performs the operation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct PodId(pub i64);

impl FromRequest for PodId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<PodId, AppError> {
    let raw = req
        .match_info()
        .get("pod_id")
        .ok_or_else(|| AppError::validation(ErrorCode::InvalidPodId, "Missing pod_id parameter"))?;

    let pod_id = raw.parse::<i64>().map_err(|_| {
        AppError::validation(ErrorCode::InvalidPodId, format!("Invalid pod id: {raw}"))
    })?;

    if pod_id <= 0 {
        return Err(AppError::validation(
            ErrorCode::InvalidPodId,
            format!("Pod id must be positive, got: {pod_id}"),
        ));
    }

    Ok(PodId(pod_id))
}
