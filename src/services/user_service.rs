use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::{self, Claims, Principal};
use crate::config::SecurityConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::User;
use crate::database::repository::UserRepository;
use crate::services::error::{ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Column width of `users.username` and `users.display_name`
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Account registration, credential checks and token issuance
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    security: SecurityConfig,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, security: SecurityConfig) -> Self {
        Self { repository, security }
    }

    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<User> {
        debug!("Entering signup for username: {}", request.username);

        for (field, value) in [
            ("username", &request.username),
            ("password", &request.password),
            ("displayName", &request.display_name),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::InvalidArgument(format!("{} must not be empty!", field)));
            }
        }

        for (field, value) in [("username", &request.username), ("displayName", &request.display_name)] {
            if value.chars().count() > MAX_NAME_LENGTH {
                return Err(ServiceError::InvalidArgument(format!(
                    "{} must be at most {} characters!",
                    field, MAX_NAME_LENGTH
                )));
            }
        }

        if self.repository.find_by_username(&request.username).await?.is_some() {
            info!("Signup rejected, username taken: {}", request.username);
            return Err(Self::username_taken(&request.username));
        }

        let password_hash = auth::hash_password(&request.password, self.security.bcrypt_cost).map_err(|e| {
            error!("Password hashing failed: {}", e);
            ServiceError::Credential(e.to_string())
        })?;

        let user = User {
            id: Uuid::new_v4(),
            username: request.username,
            password_hash,
            display_name: request.display_name,
            created_at: Utc::now(),
        };

        // A concurrent signup can still win the race; the store has the final say
        let saved = self.repository.save(user).await.map_err(|e| match e {
            DatabaseError::Conflict(_) => Self::username_taken_from(&e),
            other => ServiceError::Database(other),
        })?;

        info!("Registered user {} ({})", saved.username, saved.id);
        Ok(saved)
    }

    pub async fn authenticate(&self, request: &LoginRequest) -> ServiceResult<User> {
        debug!("Entering authenticate for username: {}", request.username);

        let Some(user) = self.repository.find_by_username(&request.username).await? else {
            warn!("Login failed: unknown username {}", request.username);
            return Err(ServiceError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        };

        let matches = auth::verify_password(&request.password, &user.password_hash).map_err(|e| {
            error!("Password verification failed for {}: {}", user.username, e);
            ServiceError::Credential(e.to_string())
        })?;

        if !matches {
            warn!("Login failed: bad password for {}", user.username);
            return Err(ServiceError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    /// Authenticate and issue a signed bearer token
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self.authenticate(&request).await?;
        let claims = Claims::new(user.id, &user.username, self.security.token_lifetime_hours());

        let token = auth::generate_jwt(&claims, &self.security.jwt_secret).map_err(|e| {
            error!("Token issuance failed: {}", e);
            ServiceError::Credential(e.to_string())
        })?;

        info!("Issued token for user {}", user.username);
        Ok(LoginResponse {
            token,
            expires_in: self.security.token_lifetime_secs(),
        })
    }

    /// Resolve the identity behind a validated token subject
    pub async fn principal_for(&self, user_id: Uuid) -> ServiceResult<Option<Principal>> {
        Ok(self
            .repository
            .find_by_id(user_id)
            .await?
            .as_ref()
            .map(Principal::from))
    }

    fn username_taken(username: &str) -> ServiceError {
        ServiceError::Conflict(format!("Username '{}' is already taken", username))
    }

    fn username_taken_from(err: &DatabaseError) -> ServiceError {
        warn!("Signup lost a race on username uniqueness: {}", err);
        ServiceError::Conflict("Username is already taken".to_string())
    }
}
