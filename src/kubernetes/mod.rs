// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and build log tailing.

pub mod client;
pub mod logs;

pub use client::create_client;
pub use logs::tail_build_logs;
