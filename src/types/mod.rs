// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! kpack custom resources.

pub mod build;
pub mod image;
pub mod source;

pub use build::Build;
pub use image::Image;
