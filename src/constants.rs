// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Labels kpack puts on build pods
pub mod labels {
    pub const IMAGE: &str = "image.build.pivotal.io/image";
    pub const BUILD_NUMBER: &str = "image.build.pivotal.io/buildNumber";
}

/// Metadata field names reported to Concourse
pub mod metadata {
    pub const GIT_URL: &str = "gitUrl";
    pub const GIT_REVISION: &str = "gitRevision";
}

/// Environment variable appended to the image build env to force a rebuild
pub const TRIGGER_ENV_VAR: &str = "buildkicker";

/// Name of the file `in` writes into its output directory
pub const VERSION_FILE: &str = "version";

/// Push polling configuration
pub mod push {
    /// Default seconds between image readiness checks
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Attempts at the read-modify-write of the image before giving up
    pub const MAX_UPDATE_ATTEMPTS: u32 = 5;
}
