// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::BuildTrigger;
use crate::concourse::{Version, VersionResponse};
use crate::constants::VERSION_FILE;
use crate::error::{ResourceError, Result};
use crate::types::source::git_metadata;
use std::path::Path;
use tracing::{debug, error, instrument};

impl BuildTrigger {
    /// Write `version` into `output_dir` and describe the build that produced it
    #[instrument(skip(self, output_dir), fields(image = %self.image_name))]
    pub async fn fetch(&self, output_dir: &Path, version: &Version) -> Result<VersionResponse> {
        let bytes = serde_json::to_vec(version)?;
        debug!("Version: {}", String::from_utf8_lossy(&bytes));

        let path = output_dir.join(VERSION_FILE);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            error!("Failed to write {}: {}", path.display(), e);
            e
        })?;

        if version.build.is_empty() {
            return Err(ResourceError::InvalidVersion(
                r#"key "build" not found in version map"#.to_string(),
            ));
        }

        let build = self.builds.get(&version.build).await.map_err(|e| {
            error!("Failed to get build {}: {}", version.build, e);
            e
        })?;

        Ok(VersionResponse {
            version: version.clone(),
            metadata: git_metadata(build.git()),
        })
    }
}
