//! Request-scoped user identity
//!
//! Every store and service call takes a [`UserContext`] explicitly; there is
//! no process-wide "current user".

use std::fmt;

use super::Authenticator;
use crate::error::{FarmbookError, FarmbookResult};

/// Longest accepted username
pub const MAX_USERNAME_LEN: usize = 64;

/// Check that a username is usable as a file-name component
///
/// Allowed: ASCII letters, digits, `_`, `-` and `.`, not starting with `.`.
pub fn validate_username(username: &str) -> FarmbookResult<()> {
    if username.trim().is_empty() {
        return Err(FarmbookError::Auth("Username must not be empty".into()));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(FarmbookError::Auth(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if username.starts_with('.')
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(FarmbookError::Auth(format!(
            "Invalid username '{}': use letters, digits, '_', '-' or '.'",
            username
        )));
    }
    Ok(())
}

/// The user a request acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserContext {
    username: String,
}

impl UserContext {
    /// Wrap a username after checking it is well-formed
    ///
    /// This does not authenticate; use [`Authenticator::login`] for that.
    pub fn new(username: impl Into<String>) -> FarmbookResult<Self> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self { username })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

/// Login state for a presentation layer
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserContext>,
}

impl Session {
    /// A logged-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// The logged-in user, if any
    pub fn current_user(&self) -> Option<&UserContext> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Mark `user` as logged in, replacing any previous user
    pub fn start(&mut self, user: UserContext) {
        self.user = Some(user);
    }

    /// Check credentials and start the session on success
    ///
    /// On failure the session is left unchanged.
    pub fn login<A: Authenticator>(
        &mut self,
        authenticator: &A,
        username: &str,
        password: &str,
    ) -> FarmbookResult<&UserContext> {
        let user = authenticator.login(username, password)?;
        Ok(self.user.insert(user))
    }

    /// Log out, returning the user that was logged in
    pub fn logout(&mut self) -> Option<UserContext> {
        self.user.take()
    }
}
