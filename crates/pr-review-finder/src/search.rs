//! # Search Specification
//!
//! Builds the instruction payload handed to the agent that actually reads
//! Slack history. Nothing here talks to Slack.
//!
//! ## Example
//!
//! ```
//! use pr_review_finder::{ChannelRegistry, SearchRequest};
//!
//! # fn example() -> pr_review_finder::Result<()> {
//! let registry = ChannelRegistry::from_channels([("C1", "eng-backend"), ("C2", "random")]);
//! let spec = SearchRequest::new(7).channel("eng").build(&registry)?;
//!
//! assert_eq!(spec.channels.len(), 1);
//! println!("{}", spec.to_json()?);
//! # Ok(())
//! # }
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ChannelMap, ChannelRegistry};
use crate::patterns::{compile_repo_pattern, REVIEW_PATTERNS};
use crate::{FinderError, Result};

/// Action name the downstream agent dispatches on
pub const SEARCH_ACTION: &str = "search_slack_for_pr_reviews";

/// Repo pattern used when neither the CLI nor the config sets one
pub const DEFAULT_REPO_PATTERN: &str = "github.com/tatari-tv/.*/pull/";

/// Default lookback window in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Slack MCP tool the agent should call per channel
pub const CHANNEL_HISTORY_TOOL: &str = "mcp__slack__slack_get_channel_history";

/// Search instructions for the downstream agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Always `search_slack_for_pr_reviews`
    pub action: String,

    /// Channels to search (ID -> display name)
    pub channels: ChannelMap,

    /// How many days back to look
    pub lookback_days: u32,

    /// Oldest message time to consider, in Unix seconds
    pub cutoff_timestamp: f64,

    /// Regex PR URLs must match
    pub repo_pattern: String,

    /// Review request heuristics
    pub review_patterns: Vec<String>,

    /// Free-text instructions
    pub instructions: String,
}

impl SearchSpec {
    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parameters for one `search` invocation
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Lookback window in days
    pub days: u32,

    /// Channel ID, or part of a channel name
    pub channel_filter: Option<String>,

    /// Regex PR URLs must match
    pub repo_pattern: Option<String>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(days: u32) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn channel(mut self, filter: impl Into<String>) -> Self {
        self.channel_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn repo_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.repo_pattern = Some(pattern.into());
        self
    }

    /// Build the spec with the cutoff measured from the current time
    pub fn build(&self, registry: &ChannelRegistry) -> Result<SearchSpec> {
        self.build_at(registry, Utc::now())
    }

    /// Build the spec with the cutoff measured from `now`.
    ///
    /// Empty channel filters and repo patterns count as unset.
    ///
    /// # Errors
    ///
    /// `ChannelNotFound` if the channel filter matches nothing,
    /// `InvalidRepoPattern` if the repo pattern doesn't compile,
    /// `InvalidLookback` if `now - days` falls outside chrono's range.
    pub fn build_at(&self, registry: &ChannelRegistry, now: DateTime<Utc>) -> Result<SearchSpec> {
        let channels = match non_empty(self.channel_filter.as_deref()) {
            Some(filter) => select_channels(registry, filter)?,
            None => registry.channels.clone(),
        };

        let repo_pattern = non_empty(self.repo_pattern.as_deref())
            .or_else(|| non_empty(registry.default_repo_pattern.as_deref()))
            .unwrap_or(DEFAULT_REPO_PATTERN)
            .to_string();
        compile_repo_pattern(&repo_pattern)?;

        let cutoff = TimeDelta::try_days(i64::from(self.days))
            .and_then(|lookback| now.checked_sub_signed(lookback))
            .ok_or(FinderError::InvalidLookback(self.days))?;
        #[allow(clippy::cast_precision_loss)]
        let cutoff_timestamp = cutoff.timestamp_micros() as f64 / 1_000_000.0;

        let instructions = render_instructions(self.days, &repo_pattern, &channels);

        info!(
            channels = channels.len(),
            days = self.days,
            repo_pattern = %repo_pattern,
            "Built search specification"
        );

        Ok(SearchSpec {
            action: SEARCH_ACTION.to_string(),
            channels,
            lookback_days: self.days,
            cutoff_timestamp,
            repo_pattern,
            review_patterns: REVIEW_PATTERNS.iter().map(ToString::to_string).collect(),
            instructions,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Resolve a channel filter: exact ID first, then case-insensitive
/// substring of the display name.
///
/// # Errors
///
/// Returns `ChannelNotFound` when neither matches.
pub fn select_channels(registry: &ChannelRegistry, filter: &str) -> Result<ChannelMap> {
    if let Some(name) = registry.get(filter) {
        debug!(channel = filter, "Channel filter matched by ID");
        return Ok(ChannelMap::from([(filter.to_string(), name.to_string())]));
    }

    let needle = filter.to_lowercase();
    let matched: ChannelMap = registry
        .channels
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .map(|(id, name)| (id.clone(), name.clone()))
        .collect();

    if matched.is_empty() {
        return Err(FinderError::ChannelNotFound(filter.to_string()));
    }

    debug!(filter, count = matched.len(), "Channel filter matched by name");
    Ok(matched)
}

fn render_instructions(days: u32, repo_pattern: &str, channels: &ChannelMap) -> String {
    let mut text = format!(
        r"
Search these Slack channels for PR review requests from the last {days} days.

For each channel, use {CHANNEL_HISTORY_TOOL} to get messages,
then look for messages that:
1. Contain GitHub PR URLs matching: {repo_pattern}
2. Contain review request patterns like: eyes, 👀, review, please look, etc.

Report findings as:
- Channel name
- Message author
- Date/time
- PR URL(s)
- Message snippet

Channels to search:
"
    );

    for (id, name) in channels {
        let _ = writeln!(text, "  - {name} ({id})");
    }

    text
}
