// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the artifact repository provisioning API

use crate::config::Config;
use crate::error::{RegistrarError, Result};
use crate::provisioner::payload::ProvisioningRequest;
use tracing::debug;
use url::Url;

/// Client for the provisioning endpoint.
/// Cheap to clone; the underlying connection pool is shared and not mutated
/// after construction, so a single instance serves all reconcilers.
#[derive(Debug, Clone)]
pub struct ProvisionerClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ProvisionerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(ProvisionerClient {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// POST a provisioning request, attaching a bearer token when given.
    /// Any 2xx answer counts as success; the response body is not inspected.
    /// Retrying is the caller's responsibility.
    pub async fn submit(&self, request: &ProvisioningRequest, token: Option<&str>) -> Result<()> {
        let mut req = self.http.post(self.endpoint.clone()).json(request);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(RegistrarError::RemoteRejected(status));
        }

        debug!("Provisioning endpoint answered {}", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_config, spawn_provisioning_endpoint};
    use http::StatusCode;

    fn make_request() -> ProvisioningRequest {
        ProvisioningRequest {
            project: "app1".to_string(),
            entity: "team-x".to_string(),
            techno: "docker".to_string(),
            location: "intranet".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_anonymous_request() {
        let (endpoint, mut requests) = spawn_provisioning_endpoint(200).await;
        let client = ProvisionerClient::new(&make_config(endpoint.as_str())).unwrap();

        client.submit(&make_request(), None).await.unwrap();

        let recorded = requests.recv().await.unwrap();
        assert_eq!(
            recorded.body,
            r#"{"project":"app1","entity":"team-x","techno":"docker","location":"intranet"}"#
        );
        assert_eq!(recorded.content_type.as_deref(), Some("application/json"));
        assert!(recorded.authorization.is_none());
    }

    #[tokio::test]
    async fn test_submit_sets_bearer_header() {
        let (endpoint, mut requests) = spawn_provisioning_endpoint(201).await;
        let client = ProvisionerClient::new(&make_config(endpoint.as_str())).unwrap();

        client.submit(&make_request(), Some("abc123")).await.unwrap();

        let recorded = requests.recv().await.unwrap();
        assert_eq!(recorded.authorization.as_deref(), Some("Bearer abc123"));
    }

    #[tokio::test]
    async fn test_submit_classifies_server_rejection() {
        let (endpoint, _requests) = spawn_provisioning_endpoint(500).await;
        let client = ProvisionerClient::new(&make_config(endpoint.as_str())).unwrap();

        let err = client.submit(&make_request(), None).await.unwrap_err();

        assert!(matches!(
            err,
            RegistrarError::RemoteRejected(status) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_submit_classifies_client_rejection() {
        let (endpoint, _requests) = spawn_provisioning_endpoint(403).await;
        let client = ProvisionerClient::new(&make_config(endpoint.as_str())).unwrap();

        let err = client.submit(&make_request(), None).await.unwrap_err();

        assert!(matches!(
            err,
            RegistrarError::RemoteRejected(status) if status == StatusCode::FORBIDDEN
        ));
    }

    #[tokio::test]
    async fn test_submit_classifies_transport_failure() {
        // Bind and immediately drop a listener so the port refuses connections
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Url::parse(&format!("http://{addr}/api")).unwrap();
        let client = ProvisionerClient::new(&make_config(endpoint.as_str())).unwrap();

        let err = client.submit(&make_request(), None).await.unwrap_err();

        assert!(matches!(err, RegistrarError::TransportError(_)));
    }
}
