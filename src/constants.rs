// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Default configuration values, overridable through the environment (see config)
pub mod defaults {
    /// Name of the per-namespace secret holding the v2 bearer token
    pub const AUTH_SECRET_NAME: &str = "api-auth-token";
    /// Key inside the auth secret holding the token bytes
    pub const AUTH_TOKEN_KEY: &str = "token";
    /// Technology tag sent with every provisioning request
    pub const TECHNO: &str = "docker";
    /// Location tag sent with every provisioning request
    pub const LOCATION: &str = "intranet";
    /// Timeout in seconds applied to each provisioning request
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Requeue delays after failed reconciliation attempts
pub mod retry {
    /// Auth secret missing or malformed, or spec fields empty; re-checked
    /// periodically until an operator fixes it
    pub const CONFIGURATION_SECS: u64 = 60;
    /// Provisioning endpoint unreachable or timed out
    pub const TRANSPORT_SECS: u64 = 30;
    /// Provisioning endpoint answered with a 5xx status
    pub const SERVER_REJECTED_SECS: u64 = 60;
    /// Provisioning endpoint answered with a 4xx status; unlikely to heal
    /// without a payload or credential fix
    pub const CLIENT_REJECTED_SECS: u64 = 300;
}
