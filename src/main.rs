// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use registrar::config::Config;
use registrar::kubernetes::wait_for_project_crd;
use registrar::provisioner::ProvisionerClient;
use registrar::reconcilers::ProjectReconciler;
use registrar::types::project::{v1, v2};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Registrar operator");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: endpoint={}", config.endpoint);

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Wait for the Project CRD before starting reconcilers
    info!("Waiting for Project CRD to become available...");
    wait_for_project_crd(&client).await?;

    // One provisioning client; its connection pool is shared by both reconcilers
    let provisioner = ProvisionerClient::new(&config)?;

    let v1_reconciler =
        ProjectReconciler::<v1::Project>::new(client.clone(), config.clone(), provisioner.clone());
    let v2_reconciler = ProjectReconciler::<v2::Project>::new(client, config, provisioner);

    info!("Starting reconcilers...");

    // Run both schema version reconcilers concurrently
    tokio::try_join!(v1_reconciler.run(), v2_reconciler.run())?;

    // This should never be reached as reconcilers run forever
    warn!("All reconcilers stopped unexpectedly");
    Ok(())
}
