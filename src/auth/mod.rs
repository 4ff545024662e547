//! Authentication for Farmbook
//!
//! Registration and credential checks against the global credentials table,
//! and the request-scoped [`UserContext`] that every bookkeeping call takes.

pub mod password;
pub mod session;

pub use password::{hash_password, needs_rehash, verify_password};
pub use session::{validate_username, Session, UserContext};

use tracing::{info, warn};

use crate::config::paths::FarmbookPaths;
use crate::error::{FarmbookError, FarmbookResult};
use crate::storage::{Credential, CredentialRepository};

/// Credential checks consumed by the presentation layer
pub trait Authenticator {
    /// Create an account. Returns false if the username is already taken.
    fn register(&self, username: &str, password: &str) -> FarmbookResult<bool>;

    /// Check a username/password pair
    fn validate(&self, username: &str, password: &str) -> FarmbookResult<bool>;

    /// Validate and hand back the user's context
    fn login(&self, username: &str, password: &str) -> FarmbookResult<UserContext> {
        if self.validate(username, password)? {
            UserContext::new(username)
        } else {
            Err(invalid_credentials())
        }
    }
}

fn invalid_credentials() -> FarmbookError {
    FarmbookError::Auth("Invalid username or password".into())
}

/// Password authentication backed by the credentials table
#[derive(Debug, Clone)]
pub struct PasswordAuthenticator {
    credentials: CredentialRepository,
}

impl PasswordAuthenticator {
    pub fn new(credentials: CredentialRepository) -> Self {
        Self { credentials }
    }

    /// Authenticator over the credentials file of `paths`
    pub fn from_paths(paths: &FarmbookPaths) -> Self {
        Self::new(CredentialRepository::new(paths))
    }
}

impl Authenticator for PasswordAuthenticator {
    fn register(&self, username: &str, password: &str) -> FarmbookResult<bool> {
        validate_username(username)?;
        if password.trim().is_empty() {
            return Err(FarmbookError::Auth("Password must not be empty".into()));
        }

        // Hashing is slow; refuse a taken name before paying for it
        if self.credentials.find(username)?.is_some() {
            warn!(user = username, "registration refused, username taken");
            return Ok(false);
        }

        let credential = Credential {
            username: username.to_string(),
            password_hash: hash_password(password)?,
        };

        let created = self.credentials.insert(credential)?;
        if created {
            info!(user = username, "registered user");
        } else {
            warn!(user = username, "registration refused, username taken");
        }
        Ok(created)
    }

    fn validate(&self, username: &str, password: &str) -> FarmbookResult<bool> {
        if validate_username(username).is_err() {
            return Ok(false);
        }
        Ok(self
            .credentials
            .find(username)?
            .map(|c| verify_password(password, &c.password_hash))
            .unwrap_or(false))
    }

    fn login(&self, username: &str, password: &str) -> FarmbookResult<UserContext> {
        validate_username(username).map_err(|_| invalid_credentials())?;

        let Some(credential) = self.credentials.find(username)? else {
            warn!(user = username, "login failed, unknown user");
            return Err(invalid_credentials());
        };

        if !verify_password(password, &credential.password_hash) {
            warn!(user = username, "login failed, wrong password");
            return Err(invalid_credentials());
        }

        if needs_rehash(&credential.password_hash) {
            // Replace the unsalted hash now that we know the password
            self.credentials
                .update_hash(username, hash_password(password)?)?;
            info!(user = username, "upgraded legacy password hash");
        }

        info!(user = username, "logged in");
        UserContext::new(username)
    }
}
