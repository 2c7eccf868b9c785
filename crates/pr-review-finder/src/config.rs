//! # Channel Registry
//!
//! Loads the Slack channels to scan from a YAML file:
//!
//! ```yaml
//! channels:
//!   C0123456789: eng-backend
//!   C0234567890: platform
//! default_repo_pattern: "github.com/my-org/.*/pull/"
//! ```
//!
//! The file is chosen by `--config`, then `PR_REVIEW_FINDER_CONFIG`, then
//! `channels.yaml` in the working directory.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FinderError, Result};

/// Config file name used when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "channels.yaml";

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "PR_REVIEW_FINDER_CONFIG";

/// Channel ID to display name, in config file order
pub type ChannelMap = IndexMap<String, String>;

/// Parsed channel config
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelRegistry {
    /// Slack channel ID -> display name
    #[serde(deserialize_with = "nullable_map")]
    pub channels: ChannelMap,

    /// Repo pattern used when the CLI doesn't pass one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_repo_pattern: Option<String>,
}

/// `channels:` with no entries parses as null
fn nullable_map<'de, D>(deserializer: D) -> std::result::Result<ChannelMap, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ChannelMap>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChannelRegistry {
    /// Build a registry from `(id, name)` pairs
    pub fn from_channels<I, K, V>(channels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            channels: channels
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
            default_repo_pattern: None,
        }
    }

    /// Load the registry from a YAML file.
    ///
    /// # Errors
    ///
    /// `ConfigNotFound` if the file doesn't exist, `ConfigParse` if it isn't
    /// valid YAML of the expected shape.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FinderError::ConfigNotFound(path.to_path_buf()),
            _ => FinderError::Io(e),
        })?;
        let registry = Self::parse(&contents).map_err(|source| FinderError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            channels = registry.len(),
            "Loaded channel registry"
        );

        Ok(registry)
    }

    /// Parse registry YAML. An empty document is an empty registry.
    pub fn parse(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str::<Option<Self>>(contents)?.unwrap_or_default())
    }

    /// Resolve the config path: explicit path, or the default file name
    #[must_use]
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Look up a channel's display name by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.channels.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channels sorted by display name (then ID)
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<(&str, &str)> {
        let mut rows: Vec<(&str, &str)> = self
            .channels
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .collect();
        rows.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Render the `list-channels` table
    #[must_use]
    pub fn format_listing(&self, config_path: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Configured channels:");
        let _ = writeln!(out, "{}", "-".repeat(50));
        for (id, name) in self.sorted_by_name() {
            let _ = writeln!(out, "  {id}: {name}");
        }
        let _ = writeln!(out, "\nTotal: {} channels", self.len());
        let _ = writeln!(
            out,
            "\nEdit {} to add/remove channels",
            config_path.display()
        );
        out
    }
}
