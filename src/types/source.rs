// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::concourse::{Metadata, MetadataField};
use crate::constants::metadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Source block shared by Image and Build specs
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<Git>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct Git {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub revision: String,
}

/// Metadata shown in the Concourse UI. Images built from a blob or registry
/// source have no git block and report empty values.
pub fn git_metadata(git: Option<&Git>) -> Metadata {
    let (url, revision) = git
        .map(|g| (g.url.clone(), g.revision.clone()))
        .unwrap_or_default();

    vec![
        MetadataField::new(metadata::GIT_URL, url),
        MetadataField::new(metadata::GIT_REVISION, revision),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_metadata() {
        let git = Git {
            url: "https://github.com/example/app".to_string(),
            revision: "abc123".to_string(),
        };

        assert_eq!(
            git_metadata(Some(&git)),
            vec![
                MetadataField::new("gitUrl", "https://github.com/example/app"),
                MetadataField::new("gitRevision", "abc123"),
            ]
        );
    }

    #[test]
    fn test_git_metadata_without_git_source() {
        let metadata = git_metadata(None);

        assert_eq!(metadata.len(), 2);
        assert!(metadata.iter().all(|m| m.value.is_empty()));
    }
}
