use std::env;

use anyhow::{Context, Result};

/// An enum representing the current environment that this tool is running in.
#[derive(Debug, PartialEq, Eq)]
pub enum DajszEnvironment {
    Dev,
    Prod,
}

impl DajszEnvironment {
    /// Returns the current environment based on the `DAJSZ_ENV` environment variable.
    pub fn current() -> Self {
        if env::var("DAJSZ_ENV").map(|e| e == "dev").unwrap_or(false) {
            Self::Dev
        } else {
            Self::Prod
        }
    }
}

/// Reads an environment variable that must be set for the server to start.
pub fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .with_context(|| format!("Make sure to set {} in the environment or the .env.", name))
}

/// Reads an environment variable, falling back to `default` when it is unset.
pub fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
