//! # Airways Auth Module
//!
//! User accounts, password hashing, bearer tokens and refresh sessions.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;
pub mod session;
pub mod user;

pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use jwt::{AccessClaims, JwtConfig, JwtManager, TokenResponse};
pub use service::{AuthContext, AuthService};
pub use session::{Session, SessionConfig, SessionManager};
pub use user::{CredentialsRequest, RegisterRequest, UpdateProfileRequest, User, UserRepository};
