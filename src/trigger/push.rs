// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::BuildTrigger;
use crate::concourse::{Version, VersionResponse};
use crate::config::PushOptions;
use crate::constants::push::MAX_UPDATE_ATTEMPTS;
use crate::error::{ResourceError, Result};
use crate::kubernetes::tail_build_logs;
use crate::types::source::git_metadata;
use kube::api::PostParams;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

impl BuildTrigger {
    /// Force a new build of the image and wait for the image to become ready again.
    ///
    /// The build pod's logs are tailed while waiting. The tailing task is
    /// cancelled and joined before this returns, whatever the outcome.
    #[instrument(skip(self, _input_dir, cancel), fields(image = %self.image_name))]
    pub async fn push(
        &self,
        _input_dir: &Path,
        options: &PushOptions,
        cancel: CancellationToken,
    ) -> Result<VersionResponse> {
        let build_number = self.trigger_build().await?;

        let log_cancel = cancel.child_token();
        let logs = tokio::spawn({
            let pods = self.pods.clone();
            let image = self.image_name.clone();
            let token = log_cancel.clone();
            async move {
                tokio::select! {
                    _ = token.cancelled() => Ok(()),
                    result = tail_build_logs(pods, image, build_number) => result,
                }
            }
        });

        let result = self.wait_until_ready(options, &cancel).await;

        log_cancel.cancel();
        match logs.await {
            Ok(Ok(())) => debug!("Stopped tailing logs of build {}", build_number),
            Ok(Err(e)) => warn!("Failed to tail logs of build {}: {}", build_number, e),
            Err(e) => warn!("Log tailing task for build {} panicked: {}", build_number, e),
        }

        result
    }

    /// Append the trigger env var with a conditional update, re-reading on conflict.
    /// Returns the build number kpack is expected to assign.
    async fn trigger_build(&self) -> Result<i64> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let mut image = self.get_image().await?;
            let build_number = image.next_build_number();
            image.append_trigger_env(trigger_value());

            match self
                .images
                .replace(&self.image_name, &PostParams::default(), &image)
                .await
            {
                Ok(_) => {
                    info!(
                        "Triggered build {} of image {}",
                        build_number, self.image_name
                    );
                    return Ok(build_number);
                }
                Err(kube::Error::Api(err)) if err.code == 409 => {
                    warn!(
                        "Image {} changed while updating (attempt {}/{}), retrying",
                        self.image_name, attempt, MAX_UPDATE_ATTEMPTS
                    );
                }
                Err(e) => {
                    error!("Failed to update image {}: {}", self.image_name, e);
                    return Err(e.into());
                }
            }
        }

        error!("Giving up on updating image {}", self.image_name);
        Err(ResourceError::UpdateConflict(
            self.image_name.clone(),
            MAX_UPDATE_ATTEMPTS,
        ))
    }

    async fn wait_until_ready(
        &self,
        options: &PushOptions,
        cancel: &CancellationToken,
    ) -> Result<VersionResponse> {
        let poll = self.poll_until_ready(options.poll_interval, cancel);

        let Some(timeout) = options.timeout else {
            return poll.await;
        };

        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            error!(
                "Image {} not ready after {} seconds",
                self.image_name,
                timeout.as_secs()
            );
            ResourceError::BuildTimeout(timeout.as_secs())
        })?
    }

    async fn poll_until_ready(
        &self,
        interval: Duration,
        cancel: &CancellationToken,
    ) -> Result<VersionResponse> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("Cancelled while waiting for image {}", self.image_name);
                    return Err(ResourceError::Cancelled);
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let image = self.get_image().await?;

            if image.is_ready() {
                info!(
                    "Image {} ready at {} (build {})",
                    self.image_name,
                    image.latest_image(),
                    image.latest_build_ref()
                );
                return Ok(VersionResponse {
                    version: Version::new(image.latest_image(), image.latest_build_ref()),
                    metadata: git_metadata(image.git()),
                });
            }

            debug!(
                "Image {} not ready, checking again in {:?}",
                self.image_name, interval
            );
        }
    }
}

/// Unique value for the trigger env var
fn trigger_value() -> String {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .to_string()
}
