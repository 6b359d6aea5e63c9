// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// URL that provisioning requests are POSTed to
    pub endpoint: Url,
    /// Name of the per-namespace secret holding the v2 bearer token
    pub auth_secret_name: String,
    /// Key inside the auth secret holding the token
    pub auth_token_key: String,
    /// Value of the `techno` payload field
    pub techno: String,
    /// Value of the `location` payload field
    pub location: String,
    /// Timeout applied to each provisioning request
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var("PROVISIONER_ENDPOINT")
            .context("PROVISIONER_ENDPOINT environment variable not set")?;
        let endpoint = Url::parse(&endpoint).context("PROVISIONER_ENDPOINT is not a valid URL")?;

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse()
                    .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            ),
            Err(_) => Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        };

        Ok(Config {
            endpoint,
            auth_secret_name: env_or("AUTH_SECRET_NAME", defaults::AUTH_SECRET_NAME),
            auth_token_key: env_or("AUTH_TOKEN_KEY", defaults::AUTH_TOKEN_KEY),
            techno: env_or("PROJECT_TECHNO", defaults::TECHNO),
            location: env_or("PROJECT_LOCATION", defaults::LOCATION),
            request_timeout,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
