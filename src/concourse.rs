// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Concourse resource protocol: request parsing and response writing.
//!
//! Requests arrive as JSON on stdin, responses leave as JSON on stdout.

use crate::config::{OutParams, Source};
use crate::error::{ResourceError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// A version as Concourse sees it: the built image reference and the build that produced it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Version {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub build: String,
    /// Any other keys of the incoming version map, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Version {
    pub fn new(reference: impl Into<String>, build: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            build: build.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Convert the raw string map Concourse sends; `ref` is mandatory
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let Some(reference) = map.get("ref") else {
            return Err(ResourceError::InvalidVersion(
                r#"key "ref" not found in version map"#.to_string(),
            ));
        };

        let extra = map
            .iter()
            .filter(|(k, _)| k.as_str() != "ref" && k.as_str() != "build")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            reference: reference.clone(),
            build: map.get("build").cloned().unwrap_or_default(),
            extra,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

impl MetadataField {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

pub type Metadata = Vec<MetadataField>;

/// Response body of `in` and `out`
#[derive(Serialize, Deserialize, Debug)]
pub struct VersionResponse {
    pub version: Version,
    pub metadata: Metadata,
}

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    source: Value,
    #[serde(default)]
    version: Option<BTreeMap<String, String>>,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug)]
pub struct CheckRequest {
    pub source: Source,
    /// `None` on the very first check of a resource
    pub version: Option<Version>,
}

#[derive(Debug)]
pub struct InRequest {
    pub source: Source,
    pub version: Version,
}

#[derive(Debug)]
pub struct OutRequest {
    pub source: Source,
    pub params: OutParams,
}

impl CheckRequest {
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let raw: RawRequest = serde_json::from_reader(reader)?;
        Ok(Self {
            source: Source::from_value(raw.source)?,
            version: raw.version.as_ref().map(Version::from_map).transpose()?,
        })
    }
}

impl InRequest {
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let raw: RawRequest = serde_json::from_reader(reader)?;
        let Some(version) = raw.version else {
            return Err(ResourceError::InvalidVersion("in requires a version".to_string()));
        };
        Ok(Self {
            source: Source::from_value(raw.source)?,
            version: Version::from_map(&version)?,
        })
    }
}

impl OutRequest {
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let raw: RawRequest = serde_json::from_reader(reader)?;
        Ok(Self {
            source: Source::from_value(raw.source)?,
            params: OutParams::from_value(raw.params)?,
        })
    }
}

/// Write a response as a single JSON document
pub fn write_response<W: Write, T: Serialize>(mut writer: W, response: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
