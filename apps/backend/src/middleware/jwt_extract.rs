//! JWT extraction middleware
//!
//! Extracts the bearer token from the Authorization header, verifies it and
//! stores the claims in request extensions. It runs on protected scopes and
//! returns 401 if no valid claims are found.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        let token = match extract_bearer_from_header(auth_header.as_ref()) {
            Ok(token) => token,
            Err(err) => return Box::pin(async move { Err(err.into()) }),
        };

        let app_state = match app_state {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(AppError::internal("AppState not available").into())
                });
            }
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => Box::pin(async move { Err(e.into()) }),
        }
    }
}

fn extract_bearer_from_header(
    header_value: Option<&actix_web::http::header::HeaderValue>,
) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::unauthorized_missing_bearer)?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::extract_bearer_from_header;

    #[test]
    fn missing_header_is_rejected() {
        assert!(extract_bearer_from_header(None).is_err());
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for raw in ["Bearer", "Basic abc", "Bearer a b", ""] {
            let value = HeaderValue::from_str(raw).unwrap();
            assert!(extract_bearer_from_header(Some(&value)).is_err(), "{raw}");
        }
    }

    #[test]
    fn well_formed_bearer_is_extracted() {
        let value = HeaderValue::from_static("Bearer token-123");
        assert_eq!(extract_bearer_from_header(Some(&value)).unwrap(), "token-123");
    }
}
