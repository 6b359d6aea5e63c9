// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const PROJECT_GROUP: &str = "cagip.github.com";
const PROJECT_KIND: &str = "Project";

/// Wait for the Project CRD to serve both schema versions.
/// This uses exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_project_crd(client: &Client) -> Result<()> {
    let mut interval = POLL_INTERVAL_SECS;

    loop {
        match check_project_crd_exists(client).await {
            Ok(true) => {
                info!(
                    "Project CRD ({}/v1 and {}/v2) is available",
                    PROJECT_GROUP, PROJECT_GROUP
                );
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "Project CRD ({}) not yet serving v1 and v2, waiting {} seconds...",
                    PROJECT_GROUP, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for Project CRD: {}, retrying in {} seconds...",
                    e, interval
                );
            }
        }

        sleep(Duration::from_secs(interval)).await;

        // Exponential backoff with max cap
        interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
    }
}

/// Check if both served versions of the Project CRD are discoverable.
async fn check_project_crd_exists(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[PROJECT_GROUP])
        .run()
        .await?;

    let mut v1_served = false;
    let mut v2_served = false;

    for group in discovery.groups() {
        if group.name() == PROJECT_GROUP {
            for (ar, _) in group.versioned_resources("v1") {
                if ar.kind == PROJECT_KIND {
                    v1_served = true;
                }
            }
            for (ar, _) in group.versioned_resources("v2") {
                if ar.kind == PROJECT_KIND {
                    v2_served = true;
                }
            }
        }
    }

    Ok(v1_served && v2_served)
}
