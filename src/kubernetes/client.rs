// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from the kubeconfig embedded in the resource source

use crate::error::{ResourceError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::env;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error, instrument};

/// Kubeconfig written to disk for the duration of client construction.
/// The file is removed when this value is dropped.
pub struct KubeconfigFile {
    file: NamedTempFile,
}

impl KubeconfigFile {
    pub fn write(kubeconfig: &str) -> Result<Self> {
        Self::write_in(&env::temp_dir(), kubeconfig)
    }

    pub fn write_in(dir: &Path, kubeconfig: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new().prefix("kube").tempfile_in(dir)?;
        file.write_all(kubeconfig.as_bytes())?;
        file.flush()?;
        debug!("Wrote kubeconfig to {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Create a Kubernetes client from a kubeconfig document.
///
/// `auth-provider` blocks (gcp, oidc) and exec plugins in the document are
/// honoured; oidc id tokens are refreshed when they expire.
pub async fn create_client(kubeconfig: &str) -> Result<Client> {
    create_client_in(&env::temp_dir(), kubeconfig).await
}

/// Same as [`create_client`], staging the kubeconfig file in `dir`
#[instrument(skip(kubeconfig))]
pub async fn create_client_in(dir: &Path, kubeconfig: &str) -> Result<Client> {
    let file = KubeconfigFile::write_in(dir, kubeconfig)?;

    let parsed = Kubeconfig::read_from(file.path()).map_err(|e| {
        error!("Failed to read kubeconfig: {}", e);
        ResourceError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e))
    })?;
    drop(file);

    let client_config = kube::Config::from_custom_kubeconfig(parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| {
            error!("Failed to build client config: {}", e);
            ResourceError::KubeconfigError(format!("Failed to create config: {}", e))
        })?;

    debug!("Connecting to {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| ResourceError::KubeconfigError(format!("Failed to create client: {}", e)))
}
