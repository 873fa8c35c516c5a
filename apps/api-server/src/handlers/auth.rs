//! Authentication handlers.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use inkpost_core::ports::{PasswordService, TokenService};
use inkpost_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    // Emails are compared and stored lowercase.
    let email = req.email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !state.config.may_register(&email) {
        tracing::warn!("registration attempt with non-allow-listed email");
        return Err(AppError::BadRequest(
            "Email is not permitted to register".to_string(),
        ));
    }
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state.users.insert(&email, &password_hash).await?;

    let token = token_service
        .issue(&user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .issue(&user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use inkpost_infra::database::entity::user;
    use inkpost_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

    use super::*;
    use crate::config::AppConfig;

    fn services() -> (
        web::Data<Arc<dyn TokenService>>,
        web::Data<Arc<dyn PasswordService>>,
    ) {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "test".to_string(),
        }));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        (web::Data::new(tokens), web::Data::new(passwords))
    }

    fn state_with(db: sea_orm::DbConn, allowlist: &str) -> web::Data<AppState> {
        web::Data::new(AppState::new(db, AppConfig::for_tests(allowlist)))
    }

    #[actix_web::test]
    async fn register_rejects_non_allowlisted_email() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let state = state_with(db, "writer@example.com");
        let (tokens, passwords) = services();

        let result = register(
            state,
            tokens,
            passwords,
            web::Json(RegisterRequest {
                email: "other@example.com".to_string(),
                password: "long enough password".to_string(),
            }),
        )
        .await;

        assert!(
            matches!(result, Err(AppError::BadRequest(detail)) if detail.contains("not permitted"))
        );
    }

    #[actix_web::test]
    async fn register_rejects_duplicate_email_case_insensitively() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![user::Model {
                id: 1,
                email: "writer@example.com".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();
        let state = state_with(db, "writer@example.com");
        let (tokens, passwords) = services();

        let result = register(
            state,
            tokens,
            passwords,
            web::Json(RegisterRequest {
                email: "Writer@EXAMPLE.com".to_string(),
                password: "long enough password".to_string(),
            }),
        )
        .await;

        assert!(
            matches!(result, Err(AppError::BadRequest(detail)) if detail.contains("already registered"))
        );
    }
}
