//! # Session Management
//!
//! Refresh-token sessions. Refresh tokens are single-use; logout revokes
//! the session immediately and an expired session never validates.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{constant_time_str_eq, generate_token, hash_token};
use super::errors::{AuthError, AuthResult};

/// Session model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// Hashed refresh token (raw token given to client)
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,

    /// Whether the session has been revoked
    pub revoked: bool,
}

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_token_ttl: Duration::days(30),
        }
    }
}

/// Session manager handles session creation and validation
pub struct SessionManager<R: SessionRepository> {
    config: SessionConfig,
    repository: R,
}

impl<R: SessionRepository> SessionManager<R> {
    pub fn new(config: SessionConfig, repository: R) -> Self {
        Self { config, repository }
    }

    /// Create a new session for a user
    ///
    /// Returns the raw refresh token (not hashed) to give to the client.
    pub fn create_session(&self, user_id: Uuid) -> AuthResult<(Session, String)> {
        // Each login prunes sessions that have aged out
        self.repository.delete_expired()?;

        let refresh_token = generate_token();
        let refresh_token_hash = hash_token(&refresh_token);

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            refresh_token_hash,
            created_at: now,
            expires_at: now + self.config.refresh_token_ttl,
            revoked: false,
        };

        self.repository.create(&session)?;

        Ok((session, refresh_token))
    }

    /// Refresh a session using the refresh token
    ///
    /// Refresh tokens are single-use: the old session is revoked and a new
    /// one created.
    pub fn refresh_session(&self, refresh_token: &str) -> AuthResult<(Session, String)> {
        let token_hash = hash_token(refresh_token);

        let old_session = self
            .repository
            .find_by_refresh_token_hash(&token_hash)?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if old_session.revoked {
            return Err(AuthError::SessionRevoked);
        }

        if old_session.expires_at < Utc::now() {
            return Err(AuthError::SessionInvalid);
        }

        self.repository.revoke(old_session.id)?;

        self.create_session(old_session.user_id)
    }

    /// Revoke a session (logout)
    pub fn revoke_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.repository.revoke(session_id)
    }

    /// Revoke all sessions for a user
    pub fn revoke_all_user_sessions(&self, user_id: Uuid) -> AuthResult<()> {
        self.repository.revoke_all_for_user(user_id)
    }

    /// Validate a refresh token and return the associated session
    pub fn validate_refresh_token(&self, refresh_token: &str) -> AuthResult<Session> {
        let token_hash = hash_token(refresh_token);

        let session = self
            .repository
            .find_by_refresh_token_hash(&token_hash)?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if session.revoked {
            return Err(AuthError::SessionRevoked);
        }

        if session.expires_at < Utc::now() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }
}

/// Session repository trait
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find session by refresh token hash
    fn find_by_refresh_token_hash(&self, hash: &str) -> AuthResult<Option<Session>>;

    /// Revoke a session
    fn revoke(&self, id: Uuid) -> AuthResult<()>;

    /// Revoke all sessions for a user
    fn revoke_all_for_user(&self, user_id: Uuid) -> AuthResult<()>;

    /// Delete expired sessions (cleanup)
    fn delete_expired(&self) -> AuthResult<usize>;
}

/// In-memory session repository
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: std::sync::RwLock<Vec<Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn create(&self, session: &Session) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        sessions.push(session.clone());
        Ok(())
    }

    fn find_by_refresh_token_hash(&self, hash: &str) -> AuthResult<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(sessions
            .iter()
            .find(|s| constant_time_str_eq(&s.refresh_token_hash, hash))
            .cloned())
    }

    fn revoke(&self, id: Uuid) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if let Some(session) = sessions.iter_mut().find(|s| s.id == id) {
            session.revoked = true;
            Ok(())
        } else {
            Err(AuthError::SessionInvalid)
        }
    }

    fn revoke_all_for_user(&self, user_id: Uuid) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        for session in sessions.iter_mut().filter(|s| s.user_id == user_id) {
            session.revoked = true;
        }

        Ok(())
    }

    fn delete_expired(&self) -> AuthResult<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        let now = Utc::now();
        let len_before = sessions.len();
        sessions.retain(|s| s.expires_at > now);
        Ok(len_before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_manager() -> SessionManager<InMemorySessionRepository> {
        SessionManager::new(SessionConfig::default(), InMemorySessionRepository::new())
    }

    #[test]
    fn test_session_creation() {
        let manager = create_manager();
        let user_id = Uuid::new_v4();

        let (session, refresh_token) = manager.create_session(user_id).unwrap();

        assert_eq!(session.user_id, user_id);
        assert!(!session.revoked);
        assert!(!refresh_token.is_empty());
    }

    #[test]
    fn test_refresh_token_validation() {
        let manager = create_manager();
        let user_id = Uuid::new_v4();

        let (_, refresh_token) = manager.create_session(user_id).unwrap();

        // Valid token should work
        let session = manager.validate_refresh_token(&refresh_token).unwrap();
        assert_eq!(session.user_id, user_id);

        // Invalid token should fail
        let result = manager.validate_refresh_token("invalid_token");
        assert!(matches!(result, Err(AuthError::InvalidRefreshToken)));
    }

    #[test]
    fn test_session_refresh_single_use() {
        let manager = create_manager();
        let user_id = Uuid::new_v4();

        let (_, refresh_token) = manager.create_session(user_id).unwrap();

        // First refresh should work
        let (new_session, new_token) = manager.refresh_session(&refresh_token).unwrap();
        assert_eq!(new_session.user_id, user_id);

        // Using old token again should fail (single-use)
        let result = manager.refresh_session(&refresh_token);
        assert!(matches!(result, Err(AuthError::SessionRevoked)));

        // New token should work
        let _ = manager.refresh_session(&new_token).unwrap();
    }

    #[test]
    fn test_session_revocation() {
        let manager = create_manager();
        let user_id = Uuid::new_v4();

        let (session, refresh_token) = manager.create_session(user_id).unwrap();

        // Revoke session
        manager.revoke_session(session.id).unwrap();

        // Token should no longer work
        let result = manager.validate_refresh_token(&refresh_token);
        assert!(matches!(result, Err(AuthError::SessionRevoked)));
    }

    #[test]
    fn test_revoke_all_user_sessions() {
        let manager = create_manager();
        let user_id = Uuid::new_v4();

        let (_, token1) = manager.create_session(user_id).unwrap();
        let (_, token2) = manager.create_session(user_id).unwrap();

        assert!(manager.validate_refresh_token(&token1).is_ok());
        assert!(manager.validate_refresh_token(&token2).is_ok());

        manager.revoke_all_user_sessions(user_id).unwrap();

        assert!(matches!(
            manager.validate_refresh_token(&token1),
            Err(AuthError::SessionRevoked)
        ));
        assert!(matches!(
            manager.validate_refresh_token(&token2),
            Err(AuthError::SessionRevoked)
        ));
    }

    #[test]
    fn test_create_session_prunes_expired_sessions() {
        let manager = create_manager();

        // A session that aged out long ago is still sitting in the store
        let stale_hash = hash_token("stale-token");
        manager
            .repository
            .create(&Session {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                refresh_token_hash: stale_hash.clone(),
                created_at: Utc::now() - Duration::days(60),
                expires_at: Utc::now() - Duration::days(30),
                revoked: false,
            })
            .unwrap();

        // The next login sweeps it out
        manager.create_session(Uuid::new_v4()).unwrap();
        assert!(manager
            .repository
            .find_by_refresh_token_hash(&stale_hash)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_expired_session_cleanup() {
        let manager = SessionManager::new(
            SessionConfig {
                refresh_token_ttl: Duration::seconds(-1),
            },
            InMemorySessionRepository::new(),
        );
        let (_, token) = manager.create_session(Uuid::new_v4()).unwrap();

        assert!(matches!(
            manager.validate_refresh_token(&token),
            Err(AuthError::SessionInvalid)
        ));
        assert_eq!(manager.repository.delete_expired().unwrap(), 1);
    }
}
