// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::retry;
use http::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Auth secret {namespace}/{name} not found")]
    SecretNotFound { namespace: String, name: String },

    #[error("Auth secret {namespace}/{name} has no '{key}' key")]
    SecretMissingKey {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("Auth secret {namespace}/{name} key '{key}' is not valid UTF-8")]
    SecretInvalidToken {
        namespace: String,
        name: String,
        key: String,
    },

    #[error("Project spec field '{0}' is empty")]
    EmptySpecField(&'static str),

    #[error("Provisioning request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Provisioning endpoint rejected request: HTTP {0}")]
    RemoteRejected(StatusCode),
}

impl RegistrarError {
    /// Delay before the next reconciliation attempt for this failure.
    /// Transient store faults requeue immediately; everything else backs off.
    pub fn retry_after(&self) -> Duration {
        let secs = match self {
            RegistrarError::KubeError(_) => return Duration::ZERO,
            RegistrarError::SecretNotFound { .. }
            | RegistrarError::SecretMissingKey { .. }
            | RegistrarError::SecretInvalidToken { .. }
            | RegistrarError::EmptySpecField(_) => retry::CONFIGURATION_SECS,
            RegistrarError::TransportError(_) => retry::TRANSPORT_SECS,
            RegistrarError::RemoteRejected(status) if status.is_client_error() => {
                retry::CLIENT_REJECTED_SECS
            }
            RegistrarError::RemoteRejected(_) => retry::SERVER_REJECTED_SECS,
        };
        Duration::from_secs(secs)
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;
