use crate::db::UserStorage;
use crate::db::models::{PublicUser, UserId, UserSummary};
use crate::error::StudyError;
use crate::service::password::{hash_password_blocking, verify_password_blocking};
use crate::service::token::{Claims, TokenSigner};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserSummary,
}

/// Registration, login and token checks on top of the `users` table.
#[derive(Clone)]
pub struct AuthService {
    users: UserStorage,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(users: UserStorage, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, StudyError> {
        if self.users.find_by_email(email).await?.is_some() {
            info!("registration rejected: email already registered");
            return Err(StudyError::Conflict("User already exists".to_string()));
        }
        let hash = hash_password_blocking(password.to_string()).await?;
        // the UNIQUE constraint still catches a concurrent registration of the same email
        let id = self.users.insert(name, email, &hash).await?;
        info!(user_id = id, "user registered");
        Ok(id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, StudyError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("login failed: no such user");
            return Err(StudyError::InvalidCredentials("User not found".to_string()));
        };

        let matches =
            verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            warn!(user_id = user.id, "login failed: wrong password");
            return Err(StudyError::InvalidCredentials(
                "Invalid credentials".to_string(),
            ));
        }

        let token = self.signer.issue(user.id, &user.email)?;
        info!(user_id = user.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Verify a bearer token. Any failure means the caller has no identity.
    pub fn authenticate(&self, token: &str) -> Result<Claims, StudyError> {
        self.signer
            .verify(token)
            .map_err(|e| StudyError::Unauthenticated(e.to_string()))
    }

    pub async fn profile(&self, user_id: UserId) -> Result<PublicUser, StudyError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| StudyError::NotFound("User not found".to_string()))
    }
}
