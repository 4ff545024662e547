//! Account CLI commands
//!
//! Registration and the login step every bookkeeping command goes through.
//! Passwords come from `FARMBOOK_PASSWORD` when set, otherwise from a hidden
//! prompt, and are wiped from memory once used.

use tracing::debug;
use zeroize::Zeroizing;

use crate::auth::{Authenticator, UserContext};
use crate::error::{FarmbookError, FarmbookResult};

/// Environment variable holding the password for non-interactive use
pub const PASSWORD_ENV: &str = "FARMBOOK_PASSWORD";

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV).ok().map(Zeroizing::new)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> FarmbookResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| FarmbookError::Io(format!("Failed to read password: {}", e)))
}

/// Read the password for an existing account
fn read_password(username: &str) -> FarmbookResult<Zeroizing<String>> {
    match password_from_env() {
        Some(password) => {
            debug!(user = username, "using password from environment");
            Ok(password)
        }
        None => prompt_password(&format!("Password for {}: ", username)),
    }
}

/// Read and confirm the password for a new account
fn read_new_password() -> FarmbookResult<Zeroizing<String>> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }

    let first = prompt_password("New password: ")?;
    let second = prompt_password("Confirm password: ")?;
    if *first != *second {
        return Err(FarmbookError::Auth("Passwords do not match".into()));
    }
    Ok(first)
}

/// Pick the username from the command line or the environment
pub fn require_username(username: Option<&str>) -> FarmbookResult<&str> {
    username.filter(|u| !u.trim().is_empty()).ok_or_else(|| {
        FarmbookError::Auth("No user given; pass --user or set FARMBOOK_USER".into())
    })
}

/// Handle the register command
pub fn handle_register_command<A: Authenticator>(
    authenticator: &A,
    username: Option<&str>,
) -> FarmbookResult<()> {
    let username = require_username(username)?;
    let password = read_new_password()?;

    if authenticator.register(username, &password)? {
        println!("Registered user '{}'.", username);
        Ok(())
    } else {
        Err(FarmbookError::Auth(format!(
            "Username '{}' is already taken",
            username
        )))
    }
}

/// Authenticate the user a command runs as
pub fn login<A: Authenticator>(
    authenticator: &A,
    username: Option<&str>,
) -> FarmbookResult<UserContext> {
    let username = require_username(username)?;
    let password = read_password(username)?;
    authenticator.login(username, &password)
}
