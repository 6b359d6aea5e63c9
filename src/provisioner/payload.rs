// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mapping from Project specs to the provisioning API request schema

use crate::config::Config;
use crate::error::{RegistrarError, Result};
use serde::Serialize;

/// Request body understood by the provisioning API.
/// Field declaration order is the canonical serialization order:
/// `project`, `entity`, `techno`, `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningRequest {
    pub project: String,
    pub entity: String,
    pub techno: String,
    pub location: String,
}

impl ProvisioningRequest {
    /// Map a project spec onto the API schema. The tenant becomes the API's
    /// `entity` field; `techno` and `location` come from configuration.
    /// Empty spec fields are rejected.
    pub fn build(project: &str, tenant: &str, config: &Config) -> Result<Self> {
        if project.is_empty() {
            return Err(RegistrarError::EmptySpecField("project"));
        }
        if tenant.is_empty() {
            return Err(RegistrarError::EmptySpecField("tenant"));
        }

        Ok(ProvisioningRequest {
            project: project.to_string(),
            entity: tenant.to_string(),
            techno: config.techno.clone(),
            location: config.location.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_config;

    #[test]
    fn test_build_maps_tenant_to_entity() {
        let config = make_config("http://provisioner.invalid/api");

        let request = ProvisioningRequest::build("app1", "team-x", &config).unwrap();

        assert_eq!(request.project, "app1");
        assert_eq!(request.entity, "team-x");
        assert_eq!(request.techno, "docker");
        assert_eq!(request.location, "intranet");
    }

    #[test]
    fn test_build_serializes_canonical_json() {
        let config = make_config("http://provisioner.invalid/api");

        let request = ProvisioningRequest::build("app1", "team-x", &config).unwrap();

        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"project":"app1","entity":"team-x","techno":"docker","location":"intranet"}"#
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = make_config("http://provisioner.invalid/api");

        let first = ProvisioningRequest::build("app1", "team-x", &config).unwrap();
        let second = ProvisioningRequest::build("app1", "team-x", &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_build_rejects_empty_project() {
        let config = make_config("http://provisioner.invalid/api");

        let err = ProvisioningRequest::build("", "team-x", &config).unwrap_err();

        assert!(matches!(err, RegistrarError::EmptySpecField("project")));
    }

    #[test]
    fn test_build_rejects_empty_tenant() {
        let config = make_config("http://provisioner.invalid/api");

        let err = ProvisioningRequest::build("app1", "", &config).unwrap_err();

        assert!(matches!(err, RegistrarError::EmptySpecField("tenant")));
    }
}
