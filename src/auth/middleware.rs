use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderMap, AUTHORIZATION},
    middleware::Next,
    web, Error, HttpMessage, ResponseError,
};

use crate::error::AppError;
use crate::AppState;

/// Dedicated header accepted when no `Authorization: Bearer` is present.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Token taken from `Authorization: Bearer <token>`, else from `x-jwt-token`.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|h| h.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, t)| t.trim().to_string());
    }
    headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|t| t.trim().to_string())
}

/// Guards resources whose path carries an `{id}` segment. On success the
/// loaded `Account` is placed in the request extensions for the handler.
pub async fn require_account_token<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        let err = AppError::InternalError("application state is not registered".into());
        return Ok(reject(req, err));
    };

    let token = extract_token(req.headers());
    let raw_id = req.match_info().get("id").unwrap_or_default().to_string();

    match state.auth.authorize(token.as_deref(), &raw_id).await {
        Ok(account) => {
            req.extensions_mut().insert(account);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(e) => Ok(reject(req, e.into())),
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    req.into_response(response).map_into_right_body()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_bearer_header() {
        let map = headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        for value in ["bearer abc.def.ghi", "BEARER abc.def.ghi", "BeArEr abc.def.ghi"] {
            let mut map = HeaderMap::new();
            map.insert(AUTHORIZATION, HeaderValue::from_static(value));
            assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"), "header {}", value);
        }
    }

    #[test]
    fn test_dedicated_header() {
        let map = headers(&[("x-jwt-token", "abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_malformed_authorization_is_not_a_token() {
        let map = headers(&[("authorization", "Basic dXNlcjpwYXNz"), ("x-jwt-token", "abc")]);
        assert_eq!(extract_token(&map), None);
    }

    #[test]
    fn test_missing_headers() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
