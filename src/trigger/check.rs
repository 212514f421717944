// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::BuildTrigger;
use crate::concourse::Version;
use crate::error::Result;
use tracing::{debug, info, instrument};

impl BuildTrigger {
    /// Report the image's latest build if it is ready and differs from `previous`.
    ///
    /// Only the newest version is reported. Builds that completed between two
    /// checks are never surfaced individually.
    #[instrument(skip(self), fields(image = %self.image_name))]
    pub async fn check(&self, previous: Option<&Version>) -> Result<Vec<Version>> {
        let image = self.get_image().await?;

        let latest = image.latest_image();
        let unchanged = latest.is_empty() || previous.is_some_and(|v| v.reference == latest);

        if image.is_ready() && !unchanged {
            info!("New version {} from build {}", latest, image.latest_build_ref());
            return Ok(vec![Version::new(latest, image.latest_build_ref())]);
        }

        debug!(
            "No new version (ready={}, latest={})",
            image.is_ready(),
            latest
        );
        Ok(Vec::new())
    }
}
