// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Build pod log tailing

use crate::constants::labels;
use crate::error::Result;
use futures::{AsyncBufReadExt, StreamExt, TryStreamExt};
use k8s_openapi::api::core::v1::{ContainerStatus, Pod};
use kube::api::LogParams;
use kube::{Api, ResourceExt};
use kube_runtime::watcher::{watcher, Config as WatcherConfig};
use kube_runtime::WatchStreamExt;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Label selector matching the pod kpack creates for a build
pub fn build_pod_selector(image: &str, build_number: i64) -> String {
    format!(
        "{}={},{}={}",
        labels::IMAGE,
        image,
        labels::BUILD_NUMBER,
        build_number
    )
}

/// Follow the logs of every build step as the build pod progresses.
/// Returns once the pod has finished; cancel by dropping the future.
#[instrument(skip(pods))]
pub async fn tail_build_logs(pods: Api<Pod>, image: String, build_number: i64) -> Result<()> {
    let selector = build_pod_selector(&image, build_number);
    let mut events = watcher(pods.clone(), WatcherConfig::default().labels(&selector))
        .default_backoff()
        .applied_objects()
        .boxed();
    let mut streamed: HashSet<String> = HashSet::new();

    debug!("Waiting for build pod matching {}", selector);

    while let Some(event) = events.next().await {
        let pod = match event {
            Ok(pod) => pod,
            Err(e) => {
                warn!("Watching build pods failed, retrying: {}", e);
                continue;
            }
        };
        let pod_name = pod.name_any();

        for container in started_containers(&pod) {
            if streamed.insert(container.clone()) {
                stream_container_logs(&pods, &pod_name, &container).await?;
            }
        }

        if is_pod_finished(&pod) {
            debug!("Build pod {} finished", pod_name);
            return Ok(());
        }
    }

    Ok(())
}

async fn stream_container_logs(pods: &Api<Pod>, pod_name: &str, container: &str) -> Result<()> {
    debug!("Streaming logs of {}/{}", pod_name, container);

    let params = LogParams {
        container: Some(container.to_string()),
        follow: true,
        ..Default::default()
    };
    let mut lines = pods.log_stream(pod_name, &params).await?.lines();

    while let Some(line) = lines.try_next().await? {
        info!("{}", line);
    }

    Ok(())
}

/// Names of containers that have started, init containers first, in declaration order
pub fn started_containers(pod: &Pod) -> Vec<String> {
    let Some(spec) = pod.spec.as_ref() else {
        return Vec::new();
    };
    let status = pod.status.as_ref();

    let init = spec
        .init_containers
        .iter()
        .flatten()
        .map(|c| (c.name.as_str(), status.and_then(|s| s.init_container_statuses.as_ref())));
    let main = spec
        .containers
        .iter()
        .map(|c| (c.name.as_str(), status.and_then(|s| s.container_statuses.as_ref())));

    init.chain(main)
        .filter(|(name, statuses)| {
            statuses
                .and_then(|list| list.iter().find(|s| s.name == *name))
                .is_some_and(has_started)
        })
        .map(|(name, _)| name.to_string())
        .collect()
}

fn has_started(status: &ContainerStatus) -> bool {
    status
        .state
        .as_ref()
        .is_some_and(|s| s.running.is_some() || s.terminated.is_some())
}

pub fn is_pod_finished(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .is_some_and(|phase| phase == "Succeeded" || phase == "Failed")
}
