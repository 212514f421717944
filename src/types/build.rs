// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::source::{Git, SourceConfig};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// kpack Build, read-only here
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "build.pivotal.io", version = "v1alpha1", kind = "Build")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceConfig>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Build {
    pub fn git(&self) -> Option<&Git> {
        self.spec.source.as_ref().and_then(|s| s.git.as_ref())
    }
}
