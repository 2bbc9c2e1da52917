//! # Auth Service
//!
//! Combines the user repository, session manager and JWT manager into the
//! operations the HTTP layer exposes: register, token exchange, refresh,
//! logout and profile management.

use std::sync::Arc;
use uuid::Uuid;

use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager, TokenResponse};
use super::session::{SessionConfig, SessionManager, SessionRepository};
use super::user::{CredentialsRequest, RegisterRequest, UpdateProfileRequest, User, UserRepository};

/// Identity carried with each authorized request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user's ID
    pub user_id: Uuid,

    /// Whether the user may mutate catalog resources
    pub is_superuser: bool,
}

impl AuthContext {
    /// Error unless the context belongs to a superuser
    pub fn require_superuser(&self) -> AuthResult<()> {
        if self.is_superuser {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Auth service combining all auth components
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    user_repo: Arc<U>,
    session_manager: SessionManager<S>,
    jwt_manager: JwtManager,
    password_policy: PasswordPolicy,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn new(
        user_repo: U,
        session_repo: S,
        jwt_config: JwtConfig,
        session_config: SessionConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            session_manager: SessionManager::new(session_config, session_repo),
            jwt_manager: JwtManager::new(jwt_config),
            password_policy,
        }
    }

    /// Register a new standard user
    pub fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        if self.user_repo.email_exists(&request.email)? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user = User::new(request.email, &request.password, &self.password_policy)?;
        self.user_repo.create(&user)?;

        Ok(user)
    }

    /// Seed a superuser at startup. Idempotent: an existing account with
    /// the same email is left untouched.
    pub fn seed_superuser(&self, email: &str, password: &str) -> AuthResult<Option<User>> {
        if self.user_repo.email_exists(email)? {
            return Ok(None);
        }

        let user = User::new_superuser(email.to_string(), password)?;
        self.user_repo.create(&user)?;

        Ok(Some(user))
    }

    /// Exchange credentials for a token pair
    pub fn issue_token(&self, request: CredentialsRequest) -> AuthResult<(User, TokenResponse)> {
        let user = self
            .user_repo
            .find_by_email(&request.email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let (_, refresh_token) = self.session_manager.create_session(user.id)?;
        let access_token = self.jwt_manager.generate_access_token(&user)?;
        let token_response = TokenResponse::new(
            access_token,
            refresh_token,
            self.jwt_manager.expires_at(),
        );

        Ok((user, token_response))
    }

    /// Refresh an access token (rotates the refresh token)
    pub fn refresh(&self, refresh_token: &str) -> AuthResult<TokenResponse> {
        let (session, new_refresh_token) = self.session_manager.refresh_session(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)?
            .ok_or(AuthError::InvalidCredentials)?;

        let access_token = self.jwt_manager.generate_access_token(&user)?;

        Ok(TokenResponse::new(
            access_token,
            new_refresh_token,
            self.jwt_manager.expires_at(),
        ))
    }

    /// Logout (invalidate the session immediately)
    pub fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        let session = self.session_manager.validate_refresh_token(refresh_token)?;
        self.session_manager.revoke_session(session.id)
    }

    /// Get user by ID
    pub fn get_user(&self, user_id: Uuid) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)?
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Update the user's own profile. A password change revokes every
    /// other session for the account.
    pub fn update_profile(&self, user_id: Uuid, update: UpdateProfileRequest) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)?
            .ok_or(AuthError::InvalidCredentials)?;

        if let Some(email) = update.email {
            super::crypto::validate_email(&email)?;
            user.email = email;
        }

        let password_changed = if let Some(password) = update.password {
            user.update_password(&password, &self.password_policy)?;
            true
        } else {
            false
        };

        user.updated_at = chrono::Utc::now();
        self.user_repo.update(&user)?;

        if password_changed {
            self.session_manager.revoke_all_user_sessions(user_id)?;
        }

        Ok(user)
    }

    /// Validate a bearer token and return the request's auth context
    pub fn authorize(&self, token: &str) -> AuthResult<AuthContext> {
        let claims = self.jwt_manager.validate_token(token)?;

        Ok(AuthContext {
            user_id: claims.user_id()?,
            is_superuser: claims.superuser,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::InMemorySessionRepository;
    use crate::auth::user::InMemoryUserRepository;

    fn create_test_service() -> AuthService<InMemoryUserRepository, InMemorySessionRepository> {
        AuthService::new(
            InMemoryUserRepository::new(),
            InMemorySessionRepository::new(),
            JwtConfig::default(),
            SessionConfig::default(),
            PasswordPolicy::default(),
        )
    }

    fn register(
        service: &AuthService<InMemoryUserRepository, InMemorySessionRepository>,
        email: &str,
    ) -> User {
        service
            .register(RegisterRequest {
                email: email.to_string(),
                password: "password123".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_register() {
        let service = create_test_service();
        let user = register(&service, "test@example.com");

        assert_eq!(user.email, "test@example.com");
        assert!(!user.is_superuser);
    }

    #[test]
    fn test_register_duplicate_email() {
        let service = create_test_service();
        register(&service, "test@example.com");

        let result = service.register(RegisterRequest {
            email: "test@example.com".to_string(),
            password: "password456".to_string(),
        });

        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[test]
    fn test_issue_token() {
        let service = create_test_service();
        register(&service, "test@example.com");

        let (user, tokens) = service
            .issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();

        assert_eq!(user.email, "test@example.com");
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
    }

    #[test]
    fn test_issue_token_wrong_password() {
        let service = create_test_service();
        register(&service, "test@example.com");

        let result = service.issue_token(CredentialsRequest {
            email: "test@example.com".to_string(),
            password: "wrong_password".to_string(),
        });

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_issue_token_unknown_email() {
        let service = create_test_service();

        let result = service.issue_token(CredentialsRequest {
            email: "nobody@example.com".to_string(),
            password: "password123".to_string(),
        });

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_refresh_token_flow() {
        let service = create_test_service();
        register(&service, "test@example.com");
        let (_, tokens) = service
            .issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();

        let new_tokens = service.refresh(&tokens.refresh_token).unwrap();

        assert!(!new_tokens.access_token.is_empty());
        assert_ne!(new_tokens.refresh_token, tokens.refresh_token);
    }

    #[test]
    fn test_logout() {
        let service = create_test_service();
        register(&service, "test@example.com");
        let (_, tokens) = service
            .issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();

        service.logout(&tokens.refresh_token).unwrap();

        // Refresh should fail immediately after logout
        let result = service.refresh(&tokens.refresh_token);
        assert!(matches!(result, Err(AuthError::SessionRevoked)));
    }

    #[test]
    fn test_authorize() {
        let service = create_test_service();
        let user = register(&service, "test@example.com");
        let (_, tokens) = service
            .issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();

        let ctx = service.authorize(&tokens.access_token).unwrap();

        assert_eq!(ctx.user_id, user.id);
        assert!(!ctx.is_superuser);
        assert!(matches!(
            ctx.require_superuser(),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_seed_superuser_idempotent() {
        let service = create_test_service();

        let first = service.seed_superuser("aboba@gmail.com", "aboba").unwrap();
        assert!(first.is_some());

        let second = service.seed_superuser("aboba@gmail.com", "aboba").unwrap();
        assert!(second.is_none());

        let (user, tokens) = service
            .issue_token(CredentialsRequest {
                email: "aboba@gmail.com".to_string(),
                password: "aboba".to_string(),
            })
            .unwrap();
        assert!(user.is_superuser);

        let ctx = service.authorize(&tokens.access_token).unwrap();
        assert!(ctx.require_superuser().is_ok());
    }

    #[test]
    fn test_update_profile_password_revokes_sessions() {
        let service = create_test_service();
        let user = register(&service, "test@example.com");
        let (_, tokens) = service
            .issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();

        service
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    email: None,
                    password: Some("new_password_1".to_string()),
                },
            )
            .unwrap();

        // Old session is gone
        assert!(matches!(
            service.refresh(&tokens.refresh_token),
            Err(AuthError::SessionRevoked)
        ));

        // New password works, old one does not
        assert!(service
            .issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "new_password_1".to_string(),
            })
            .is_ok());
        assert!(matches!(
            service.issue_token(CredentialsRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            }),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
