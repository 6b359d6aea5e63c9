// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project custom resource schemas and the version capability trait.

use crate::config::Config;
use crate::error::Result;
use crate::kubernetes::resolve_token;
use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use kube::{Client, Resource};
use serde::de::DeserializeOwned;

/// Capability set shared by every Project schema version.
///
/// The reconciler core is written once against this trait. Fetching goes
/// through the `Resource` bounds (a typed `Api` per version); resolving auth
/// is the only behavior the versions implement differently.
#[async_trait]
pub trait ProjectVersion:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + std::fmt::Debug
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Schema version tag, used in logs
    const VERSION: &'static str;

    /// Project identifier to provision
    fn project(&self) -> &str;

    /// Tenant owning the project
    fn tenant(&self) -> &str;

    /// Resolve the bearer token for provisioning calls, if this version
    /// authenticates them.
    async fn resolve_auth(
        client: &Client,
        namespace: &str,
        config: &Config,
    ) -> Result<Option<String>>;
}

pub mod v1 {
    use kube::CustomResource;
    use serde::{Deserialize, Serialize};

    /// First schema revision; provisioning calls are anonymous.
    #[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
    #[kube(group = "cagip.github.com", version = "v1", kind = "Project")]
    #[kube(namespaced, plural = "projects")]
    pub struct ProjectSpec {
        pub project: String,
        pub tenant: String,
    }
}

pub mod v2 {
    use kube::CustomResource;
    use serde::{Deserialize, Serialize};

    /// Second schema revision; provisioning calls carry a bearer token read
    /// from a secret in the resource's namespace.
    #[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
    #[kube(group = "cagip.github.com", version = "v2", kind = "Project")]
    #[kube(namespaced, plural = "projects")]
    pub struct ProjectSpec {
        pub project: String,
        pub tenant: String,
    }
}

#[async_trait]
impl ProjectVersion for v1::Project {
    const VERSION: &'static str = "v1";

    fn project(&self) -> &str {
        &self.spec.project
    }

    fn tenant(&self) -> &str {
        &self.spec.tenant
    }

    async fn resolve_auth(
        _client: &Client,
        _namespace: &str,
        _config: &Config,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}

#[async_trait]
impl ProjectVersion for v2::Project {
    const VERSION: &'static str = "v2";

    fn project(&self) -> &str {
        &self.spec.project
    }

    fn tenant(&self) -> &str {
        &self.spec.tenant
    }

    async fn resolve_auth(
        client: &Client,
        namespace: &str,
        config: &Config,
    ) -> Result<Option<String>> {
        let token = resolve_token(
            client,
            namespace,
            &config.auth_secret_name,
            &config.auth_token_key,
        )
        .await?;
        Ok(Some(token))
    }
}
