// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bearer token lookup for authenticated provisioning calls

use crate::error::{RegistrarError, Result};
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use tracing::{debug, instrument};

/// Read the provisioning API token from a namespaced secret.
/// The stored bytes are interpreted as a UTF-8 string.
#[instrument(skip(client))]
pub async fn resolve_token(
    client: &Client,
    namespace: &str,
    name: &str,
    key: &str,
) -> Result<String> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    let Some(secret) = secrets.get_opt(name).await? else {
        return Err(RegistrarError::SecretNotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
    };

    let Some(value) = secret.data.as_ref().and_then(|d| d.get(key)) else {
        return Err(RegistrarError::SecretMissingKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
            key: key.to_string(),
        });
    };

    debug!("Resolved auth token from secret {}/{}", namespace, name);

    String::from_utf8(value.0.clone()).map_err(|_| RegistrarError::SecretInvalidToken {
        namespace: namespace.to_string(),
        name: name.to_string(),
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{secret_json, MockService};

    const SECRET_PATH: &str = "/api/v1/namespaces/ns1/secrets/api-auth-token";

    #[tokio::test]
    async fn test_resolve_token_success() {
        let client = MockService::new()
            .on_get(
                SECRET_PATH,
                200,
                &secret_json("ns1", "api-auth-token", "token", b"abc123"),
            )
            .into_client();

        let token = resolve_token(&client, "ns1", "api-auth-token", "token")
            .await
            .unwrap();

        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_resolve_token_secret_not_found() {
        let client = MockService::new().into_client();

        let err = resolve_token(&client, "ns1", "api-auth-token", "token")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistrarError::SecretNotFound { ref namespace, ref name }
                if namespace == "ns1" && name == "api-auth-token"
        ));
    }

    #[tokio::test]
    async fn test_resolve_token_missing_key() {
        let client = MockService::new()
            .on_get(
                SECRET_PATH,
                200,
                &secret_json("ns1", "api-auth-token", "password", b"abc123"),
            )
            .into_client();

        let err = resolve_token(&client, "ns1", "api-auth-token", "token")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistrarError::SecretMissingKey { ref key, .. } if key == "token"
        ));
    }

    #[tokio::test]
    async fn test_resolve_token_invalid_utf8() {
        let client = MockService::new()
            .on_get(
                SECRET_PATH,
                200,
                &secret_json("ns1", "api-auth-token", "token", &[0xff, 0xfe]),
            )
            .into_client();

        let err = resolve_token(&client, "ns1", "api-auth-token", "token")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrarError::SecretInvalidToken { .. }));
    }
}
