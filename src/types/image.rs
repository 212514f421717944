// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::TRIGGER_ENV_VAR;
use crate::types::source::{Git, SourceConfig};
use k8s_openapi::api::core::v1::EnvVar;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// kpack Image. Only the fields this resource reads or writes are typed,
/// everything else is carried in `extra` so a replace does not drop it.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "build.pivotal.io", version = "v1alpha1", kind = "Image")]
#[kube(namespaced)]
#[kube(status = "ImageStatus")]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<ImageBuild>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageBuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_build_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_counter: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Image {
    /// The latest build finished successfully
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .is_some_and(|conditions| {
                conditions
                    .iter()
                    .any(|c| c.condition_type == "Ready" && c.status == "True")
            })
    }

    pub fn latest_image(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.latest_image.as_deref())
            .unwrap_or_default()
    }

    pub fn latest_build_ref(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.latest_build_ref.as_deref())
            .unwrap_or_default()
    }

    /// Number kpack will give the next build it schedules for this image
    pub fn next_build_number(&self) -> i64 {
        self.status
            .as_ref()
            .and_then(|s| s.build_counter)
            .unwrap_or(0)
            + 1
    }

    pub fn git(&self) -> Option<&Git> {
        self.spec.source.as_ref().and_then(|s| s.git.as_ref())
    }

    /// Append the trigger env var; any change to the build env makes kpack schedule a build
    pub fn append_trigger_env(&mut self, value: String) {
        self.spec
            .build
            .get_or_insert_with(ImageBuild::default)
            .env
            .get_or_insert_with(Vec::new)
            .push(EnvVar {
                name: TRIGGER_ENV_VAR.to_string(),
                value: Some(value),
                value_from: None,
            });
    }
}
