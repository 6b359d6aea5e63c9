// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the Project CRD manifest with both served schema versions.
//!
//! ```bash
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use anyhow::Result;
use kube::core::crd::merge_crds;
use kube::CustomResourceExt;

use registrar::types::project::{v1, v2};

fn main() -> Result<()> {
    // v2 is the stored version; v1 stays served for older clients
    let crd = merge_crds(vec![v1::Project::crd(), v2::Project::crd()], "v2")?;
    print!("{}", serde_yaml::to_string(&crd)?);
    Ok(())
}
