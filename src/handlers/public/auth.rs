use std::collections::HashMap;

use axum::{extract::Extension, response::Json};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::config;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub email: String,
    pub role: String,
}

/// POST /auth/login - exchange credentials for a JWT.
///
/// Unknown email and wrong password produce the same message so the response
/// does not reveal which accounts exist.
pub async fn login(
    Extension(pool): Extension<PgPool>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    validate_login(&payload)?;

    let users = UserRepository::new(pool);
    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect email or password"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Incorrect email or password"));
    }

    let claims = Claims::new(user.id, user.email.clone(), user.role.clone());
    let token = generate_jwt(claims).map_err(|e| {
        tracing::error!("JWT generation failed: {}", e);
        ApiError::internal_server_error("Could not complete login")
    })?;

    let expiry_hours = config::config().security.jwt_expiry_hours;
    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_at: Utc::now() + Duration::hours(expiry_hours as i64),
        email: user.email,
        role: user.role,
    }))
}

fn validate_login(payload: &LoginRequest) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if payload.email.trim().is_empty() {
        field_errors.insert("email".to_string(), "Email is required".to_string());
    }
    if payload.password.is_empty() {
        field_errors.insert("password".to_string(), "Password is required".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid login request", Some(field_errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_credentials_with_field_errors() {
        let err = validate_login(&LoginRequest {
            email: "  ".into(),
            password: "".into(),
        })
        .unwrap_err();

        let body = err.to_json();
        assert_eq!(err.status_code(), 400);
        assert!(body["field_errors"]["email"].is_string());
        assert!(body["field_errors"]["password"].is_string());
    }

    #[test]
    fn accepts_present_credentials() {
        assert!(validate_login(&LoginRequest {
            email: "user@example.com".into(),
            password: "pw".into(),
        })
        .is_ok());
    }
}
