// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool configuration, loaded from an optional JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PictoolError, Result};
use crate::types::Value;

/// Persistent tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Seed for filters that use randomness. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Per-filter parameter overrides, e.g. `{"blur": {"radius": 3}}`.
    pub filters: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_filter: "info".to_owned(),
            filters: BTreeMap::new(),
        }
    }
}

impl ToolConfig {
    /// Read a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
            .map_err(|err| PictoolError::Config(format!("{}: {}", path.display(), err)))
    }

    /// Parse a config from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| PictoolError::Config(err.to_string()))
    }

    /// The configured override for `param` of `filter`, if any.
    pub fn override_for(&self, filter: &str, param: &str) -> Option<&Value> {
        self.filters.get(filter)?.get(param)
    }
}
