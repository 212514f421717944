// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::push::POLL_INTERVAL_SECS;
use crate::error::{ResourceError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Resource configuration from the pipeline's `source` block
#[derive(Clone, Deserialize)]
pub struct Source {
    /// Full kubeconfig document used to reach the cluster running kpack
    pub kubeconfig: String,
    /// Namespace holding the Image and its Builds
    pub namespace: String,
    /// Name of the kpack Image resource
    pub image: String,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Source {
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Err(ResourceError::InvalidSource("source is missing".to_string()));
        }
        serde_json::from_value(value).map_err(|e| ResourceError::InvalidSource(e.to_string()))
    }
}

// The kubeconfig carries credentials, keep it out of logs.
impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("kubeconfig", &"<redacted>")
            .field("namespace", &self.namespace)
            .field("image", &self.image)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// `params` of a put step
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutParams {
    /// Seconds to wait for the triggered build before failing
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub poll_interval: Option<u64>,
}

impl OutParams {
    pub fn from_value(value: Option<Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(v) => {
                serde_json::from_value(v).map_err(|e| ResourceError::InvalidSource(e.to_string()))
            }
        }
    }

    pub fn push_options(&self) -> PushOptions {
        PushOptions {
            poll_interval: Duration::from_secs(self.poll_interval.unwrap_or(POLL_INTERVAL_SECS)),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Tuning for the push poll loop
#[derive(Debug, Clone)]
pub struct PushOptions {
    pub poll_interval: Duration,
    /// No deadline when `None`
    pub timeout: Option<Duration>,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_from_value() {
        let source = Source::from_value(json!({
            "kubeconfig": "apiVersion: v1",
            "namespace": "ci",
            "image": "app-image"
        }))
        .unwrap();

        assert_eq!(source.namespace, "ci");
        assert_eq!(source.image, "app-image");
        assert_eq!(source.log_level, None);
    }

    #[test]
    fn test_source_missing_image() {
        let err = Source::from_value(json!({
            "kubeconfig": "apiVersion: v1",
            "namespace": "ci"
        }))
        .unwrap_err();

        assert!(matches!(err, ResourceError::InvalidSource(msg) if msg.contains("image")));
    }

    #[test]
    fn test_source_namespace_not_a_string() {
        let err = Source::from_value(json!({
            "kubeconfig": "apiVersion: v1",
            "namespace": 42,
            "image": "app-image"
        }))
        .unwrap_err();

        assert!(matches!(err, ResourceError::InvalidSource(_)));
    }

    #[test]
    fn test_source_null() {
        assert!(matches!(
            Source::from_value(Value::Null),
            Err(ResourceError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_source_debug_hides_kubeconfig() {
        let source = Source {
            kubeconfig: "token: hunter2".to_string(),
            namespace: "ci".to_string(),
            image: "app-image".to_string(),
            log_level: None,
        };

        assert!(!format!("{:?}", source).contains("hunter2"));
    }

    #[test]
    fn test_out_params_defaults() {
        let options = OutParams::from_value(None).unwrap().push_options();

        assert_eq!(options.poll_interval, Duration::from_secs(10));
        assert_eq!(options.timeout, None);
    }

    #[test]
    fn test_out_params_timeout() {
        let params = OutParams::from_value(Some(json!({"timeout": 600, "poll_interval": 5}))).unwrap();
        let options = params.push_options();

        assert_eq!(options.poll_interval, Duration::from_secs(5));
        assert_eq!(options.timeout, Some(Duration::from_secs(600)));
    }
}
