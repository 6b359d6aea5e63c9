// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project reconciler - drives the provisioning API toward the declared state.
//!
//! One reconciliation algorithm serves both schema versions; everything
//! version-specific goes through the [`ProjectVersion`] trait.

use crate::config::Config;
use crate::error::{RegistrarError, Result};
use crate::provisioner::{ProvisionerClient, ProvisioningRequest};
use crate::types::project::ProjectVersion;
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// State shared by every reconciliation attempt of one schema version.
struct Context {
    client: Client,
    config: Config,
    provisioner: ProvisionerClient,
}

pub struct ProjectReconciler<P> {
    context: Arc<Context>,
    _version: PhantomData<P>,
}

impl<P: ProjectVersion> ProjectReconciler<P> {
    pub fn new(client: Client, config: Config, provisioner: ProvisionerClient) -> Self {
        Self {
            context: Arc::new(Context {
                client,
                config,
                provisioner,
            }),
            _version: PhantomData,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let projects: Api<P> = Api::all(self.context.client.clone());

        Controller::new(projects, WatcherConfig::default())
            .run(reconcile::<P>, error_policy::<P>, self.context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled {} project: {:?}", P::VERSION, o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile<P: ProjectVersion>(project: Arc<P>, ctx: Arc<Context>) -> Result<Action> {
    let name = project.name_any();
    let namespace = project.namespace().unwrap_or_default();

    debug!("Reconciling {} project: {}/{}", P::VERSION, namespace, name);

    // Re-fetch by key so a deletion between the watch event and this attempt
    // is observed instead of acting on stale data
    let projects: Api<P> = Api::namespaced(ctx.client.clone(), &namespace);
    let Some(project) = projects.get_opt(&name).await? else {
        debug!(
            "Project {}/{} not found. Ignoring since object must be deleted.",
            namespace, name
        );
        return Ok(Action::await_change());
    };

    let token = P::resolve_auth(&ctx.client, &namespace, &ctx.config).await?;
    let request = ProvisioningRequest::build(project.project(), project.tenant(), &ctx.config)?;
    ctx.provisioner.submit(&request, token.as_deref()).await?;

    info!(
        "Provisioned {} project {}/{} for tenant {}",
        P::VERSION,
        namespace,
        name,
        project.tenant()
    );

    Ok(Action::await_change())
}

fn error_policy<P: ProjectVersion>(
    project: Arc<P>,
    error: &RegistrarError,
    _ctx: Arc<Context>,
) -> Action {
    error!(
        "Reconciliation of {} project {}/{} failed: {}",
        P::VERSION,
        project.namespace().unwrap_or_default(),
        project.name_any(),
        error
    );
    Action::requeue(error.retry_after())
}
