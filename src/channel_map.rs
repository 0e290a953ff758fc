//! Channel-name lookup loaded from a JSON resource.
//!
//! The resource is a flat string→string object keyed by `ch-<index>` with
//! 1-based, unpadded indices, e.g. `{"ch-1": "Fp1", "ch-2": "Fp2"}`. It is
//! loaded once at panel construction and read-only afterwards. A missing key
//! is not an error: the channel simply gets a bare `Ch-NN` label.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from loading a configured channel-map resource.
///
/// Both variants are fatal at construction time: a panel configured with a
/// channel map must not start without it.
#[derive(Debug, Error)]
pub enum ChannelMapError {
    #[error("failed to read channel map {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse channel map {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only mapping from channel index to a human-readable name.
#[derive(Debug, Clone, Default)]
pub struct ChannelMap {
    names: HashMap<String, String>,
}

impl ChannelMap {
    /// A map with no entries; every label comes out bare.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-built mapping (keys must use the `ch-<index>` form).
    pub fn from_names(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Load the mapping from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChannelMapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ChannelMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names = serde_json::from_str(&text).map_err(|source| ChannelMapError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { names })
    }

    /// Human-readable name for a 1-based channel index, if mapped.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(&format!("ch-{index}")).map(String::as_str)
    }

    /// Display label for a 1-based channel index.
    ///
    /// `Ch-04` for an unmapped channel, `Ch-04:  P3` for a mapped one. The
    /// index is zero-padded to two digits.
    pub fn label(&self, index: usize) -> String {
        match self.name(index) {
            Some(name) => format!("Ch-{index:02}:  {name}"),
            None => format!("Ch-{index:02}"),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
