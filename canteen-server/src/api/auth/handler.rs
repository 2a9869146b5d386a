//! Authentication Handlers
//!
//! Handles account creation, login and the current-user endpoint.

use std::time::Duration;

use axum::{Json, extract::State};
use validator::Validate;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Profile;
use crate::utils::now_millis;

// Re-use shared DTOs for API consistency
use shared::client::{AuthResponse, LoginRequest, SignupRequest, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Signup handler
///
/// Creates an account and returns a token, so signup doubles as login.
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()?;

    let hash_pass = Profile::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let profile = Profile {
        id: None,
        email: req.email.trim().to_lowercase(),
        full_name: req.full_name.trim().to_string(),
        mobile: req.mobile,
        role: req.role,
        hash_pass,
        created_at: now_millis(),
    };

    let created = state.profiles().create(profile).await?;
    let user_id = created
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &created.email, &created.full_name, created.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        email = %created.email,
        role = %created.role,
        "Account created"
    );

    Ok(Json(AuthResponse {
        token,
        user: created.to_user_info(),
    }))
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()?;
    let email = req.email.trim().to_lowercase();

    let profile = state.profiles().find_by_email(&email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let profile = match profile {
        Some(p) => {
            let password_valid = p
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            p
        }
        None => {
            tracing::warn!(email = %email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = profile
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &profile.email, &profile.full_name, profile.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        email = %profile.email,
        role = %profile.role,
        "User logged in successfully"
    );

    Ok(Json(AuthResponse {
        token,
        user: profile.to_user_info(),
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AppError> {
    // Query fresh profile data so role changes take effect without re-login
    let profile = state
        .profiles()
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists".to_string()))?;

    Ok(Json(profile.to_user_info()))
}
