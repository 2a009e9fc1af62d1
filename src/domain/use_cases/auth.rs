use validator::Validate;

use crate::entities::session::SessionGrant;
use crate::entities::user::{LoginUser, NewUser, User, UserProfile};
use crate::errors::{AppError, AuthError};
use crate::repositories::department::DepartmentRepository;
use crate::repositories::token::TokenServiceRepository;
use crate::repositories::user::UserRepository;
use crate::auth::password::{hash_password, verify_password};

pub struct AuthHandler<R, D, T>
where
    R: UserRepository,
    D: DepartmentRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub department_repo: D,
    pub token_service: T,
}

impl<R, D, T> AuthHandler<R, D, T>
where
    R: UserRepository,
    D: DepartmentRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, department_repo: D, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            department_repo,
            token_service
        }
    }

    /// Registers a new account and opens a session for it
    pub async fn register(&self, request: NewUser) -> Result<SessionGrant, AppError> {
        request.validate()?;

        let role = request.role
            .ok_or_else(|| AppError::BadRequest("Role is required".to_string()))?;

        if self.user_repo.get_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        if let Some(department_id) = request.department_id {
            if !self.department_repo.department_exists(department_id).await? {
                return Err(AppError::BadRequest("Unknown department".to_string()));
            }
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(role, hashed_password);

        let user_id = self.user_repo.create_user(&user_insert).await?;
        let user = self.user_repo.get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InternalError("Registered user could not be reloaded".to_string()))?;

        tracing::info!(user_id, role = %role, "User registered");
        Ok(self.grant_session(&user).await?)
    }

    /// Matches email, role and password, then opens a session
    pub async fn login(&self, request: LoginUser) -> Result<SessionGrant, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|e| {
                tracing::warn!("User lookup failed during login: {}", e);
                AuthError::WrongCredentials
            })?
            .ok_or(AuthError::WrongCredentials)?;

        if request.role != Some(user.role) {
            return Err(AuthError::WrongCredentials);
        }

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::WrongCredentials);
        }

        let grant = self.grant_session(&user).await?;

        tracing::info!(user_id = user.id, "User logged in successfully");
        Ok(grant)
    }

    /// Public profile of the session's user
    pub async fn current_user(&self, user_id: i64) -> Result<UserProfile, AppError> {
        self.user_repo.get_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn grant_session(&self, user: &User) -> Result<SessionGrant, AuthError> {
        let token = self.token_service.create_session_token(user)
            .map_err(|e| {
                tracing::warn!("Failed to create session token: {}", e);
                AuthError::TokenCreation
            })?;

        let profile = self.user_repo.get_user_profile(user.id)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to load profile for session: {}", e);
                AuthError::TokenCreation
            })?
            .ok_or(AuthError::WrongCredentials)?;

        Ok(SessionGrant { user: profile, token })
    }
}
