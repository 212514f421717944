// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Check, fetch and push operations against a single kpack Image.

mod check;
mod fetch;
mod push;

use crate::config::Source;
use crate::error::Result;
use crate::types::{Build, Image};
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client};
use tracing::error;

/// Handle on one kpack Image and the Builds and pods kpack creates for it.
/// Built once per process from an already connected client.
pub struct BuildTrigger {
    images: Api<Image>,
    builds: Api<Build>,
    pods: Api<Pod>,
    image_name: String,
}

impl BuildTrigger {
    pub fn new(client: Client, namespace: &str, image_name: &str) -> Self {
        Self {
            images: Api::namespaced(client.clone(), namespace),
            builds: Api::namespaced(client.clone(), namespace),
            pods: Api::namespaced(client, namespace),
            image_name: image_name.to_string(),
        }
    }

    pub fn from_source(client: Client, source: &Source) -> Self {
        Self::new(client, &source.namespace, &source.image)
    }

    async fn get_image(&self) -> Result<Image> {
        self.images.get(&self.image_name).await.map_err(|e| {
            error!("Failed to get image {}: {}", self.image_name, e);
            e.into()
        })
    }
}
