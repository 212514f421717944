// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Initialize tracing on stderr; stdout carries the protocol response.
/// `RUST_LOG` wins over the level configured in the resource source.
pub fn init(level: Option<&str>) {
    let level = match level {
        Some("silent") => "off",
        Some(level) => level,
        None => DEFAULT_LEVEL,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
