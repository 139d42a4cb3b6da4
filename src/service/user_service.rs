use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::config::AuthConfig;
use crate::dto::auth_dto::{LoginResponse, RegisterRequest, UserWithoutPassword};
use crate::model::user::{User, UserRole};
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{constant_time_eq, PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<UserWithoutPassword, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<LoginResponse, ServiceError>;
    async fn sales_reps(&self) -> Result<Vec<UserWithoutPassword>, ServiceError>;
    async fn find_auth_user(&self, id: &str) -> Result<Option<UserWithoutPassword>, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<MongoUserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub auth_config: AuthConfig,
}

impl UserServiceImpl {
    pub fn new(
        user_repo: Arc<MongoUserRepository>,
        jwt_utils: Arc<JwtTokenUtilsImpl>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            jwt_utils,
            auth_config,
        }
    }

    /// Resolves the requested role. Admin needs the matching secret code,
    /// salesrep needs no extra gate, anything else collapses to user.
    fn resolve_role(
        &self,
        requested: Option<&str>,
        admin_secret_code: Option<&str>,
    ) -> Result<UserRole, ServiceError> {
        match requested.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("admin") => {
                let code = admin_secret_code.ok_or_else(|| {
                    ServiceError::InvalidInput(
                        "Admin secret code is required for admin registration".to_string(),
                    )
                })?;
                if !constant_time_eq(code, &self.auth_config.admin_secret_code) {
                    warn!("Admin registration attempted with invalid secret code");
                    return Err(ServiceError::Forbidden(
                        "Invalid admin secret code".to_string(),
                    ));
                }
                Ok(UserRole::Admin)
            }
            Some("salesrep") => Ok(UserRole::Salesrep),
            _ => Ok(UserRole::User),
        }
    }

    fn token_response(&self, user: &User) -> Result<LoginResponse, ServiceError> {
        let user_id = user
            .id
            .as_ref()
            .map(|id| id.to_hex())
            .ok_or_else(|| ServiceError::InternalError("User has no id".to_string()))?;
        let pair = self
            .jwt_utils
            .generate_token_pair(&user_id, &user.email, user.role.as_str())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        Ok(LoginResponse {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
            token_type: pair.token_type,
        })
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<UserWithoutPassword, ServiceError> {
        info!("Registering new user");

        let first_name = request.first_name.trim().to_string();
        let last_name = request.last_name.trim().to_string();
        let phone_number = request.phone_number.trim().to_string();
        let email = request.email.trim().to_lowercase();

        if first_name.is_empty() || last_name.is_empty() || phone_number.is_empty() || email.is_empty()
        {
            return Err(ServiceError::InvalidInput(
                "Please fill all required fields".to_string(),
            ));
        }

        if request.password != request.confirm_password {
            return Err(ServiceError::InvalidInput(
                "Passwords do not match".to_string(),
            ));
        }

        let role = self.resolve_role(
            request.role.as_deref(),
            request.admin_secret_code.as_deref(),
        )?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            first_name,
            middle_name: request.middle_name.map(|m| m.trim().to_string()),
            last_name,
            phone_number,
            email,
            password_hash,
            role,
            created_at: None,
            updated_at: None,
        };

        let inserted = self.user_repo.insert(user).await?;
        info!("User registered successfully");
        Ok(UserWithoutPassword::from(inserted))
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ServiceError> {
        let email = email.trim().to_lowercase();

        // A missing user and a wrong password must be indistinguishable to
        // the caller.
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown email");
                return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Login attempt with invalid password");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        info!("User logged in successfully");
        self.token_response(&user)
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<LoginResponse, ServiceError> {
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Invalid refresh token".to_string()))?;
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid refresh token".to_string()))?;

        info!("Token refreshed for user");
        self.token_response(&user)
    }

    #[instrument(skip(self))]
    async fn sales_reps(&self) -> Result<Vec<UserWithoutPassword>, ServiceError> {
        let reps = self.user_repo.find_by_role(UserRole::Salesrep).await;
        match &reps {
            Ok(reps) => info!("Fetched {} sales reps", reps.len()),
            Err(e) => error!("Failed to fetch sales reps: {e}"),
        }
        Ok(reps?.into_iter().map(UserWithoutPassword::from).collect())
    }

    async fn find_auth_user(&self, id: &str) -> Result<Option<UserWithoutPassword>, ServiceError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };
        let user = self.user_repo.find_by_id(&object_id).await?;
        Ok(user.map(UserWithoutPassword::from))
    }
}
