// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid source configuration: {0}")]
    InvalidSource(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image {0} kept changing, gave up after {1} update attempts")]
    UpdateConflict(String, u32),

    #[error("Build did not become ready within {0} seconds")]
    BuildTimeout(u64),

    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ResourceError>;
