//! Authentication middleware and extractors.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};

use inkpost_core::ports::{AuthError, TokenService};
use inkpost_shared::ErrorResponse;

/// Authenticated caller identity, recovered from the bearer token.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::MissingAuth => ErrorResponse::unauthorized()
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidToken(msg) => ErrorResponse::unauthorized().with_detail(msg.clone()),
            _ => ErrorResponse::unauthorized(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token_service) = req.app_data::<actix_web::web::Data<Arc<dyn TokenService>>>()
        else {
            tracing::error!("TokenService not found in app data");
            return ready(Err(AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))));
        };

        let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
            return ready(Err(AuthenticationError(AuthError::MissingAuth)));
        };

        let Ok(auth_str) = auth_header.to_str() else {
            return ready(Err(AuthenticationError(AuthError::InvalidToken(
                "Invalid authorization header".to_string(),
            ))));
        };

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return ready(Err(AuthenticationError(AuthError::InvalidToken(
                "Expected Bearer token".to_string(),
            ))));
        };

        match token_service.verify(token) {
            Ok(email) => ready(Ok(Identity { email })),
            Err(err) => ready(Err(AuthenticationError(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::web;

    use inkpost_infra::{JwtConfig, JwtTokenService};

    use super::*;

    fn token_data() -> web::Data<Arc<dyn TokenService>> {
        let service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "test".to_string(),
        }));
        web::Data::new(service)
    }

    #[actix_web::test]
    async fn bearer_token_yields_identity() {
        let data = token_data();
        let token = data.issue("writer@example.com").unwrap();

        let req = TestRequest::default()
            .app_data(data)
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let identity = Identity::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(identity.email, "writer@example.com");
    }

    #[actix_web::test]
    async fn missing_header_is_rejected() {
        let req = TestRequest::default().app_data(token_data()).to_http_request();

        let err = Identity::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert!(matches!(err.0, AuthError::MissingAuth));
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .app_data(token_data())
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_http_request();

        let err = Identity::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert!(matches!(err.0, AuthError::InvalidToken(_)));
    }
}
