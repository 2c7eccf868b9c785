//! # PR Review Finder
//!
//! Finds PR review requests in Slack channels. The crate never calls Slack
//! itself: it classifies message text with keyword heuristics, extracts
//! GitHub PR URLs, and builds a JSON search specification that another agent
//! executes with its own Slack tools.
//!
//! ## Modules
//!
//! - [`config`] - channel registry loaded from `channels.yaml`
//! - [`patterns`] - review-request heuristics and PR URL extraction
//! - [`search`] - search specification builder
//! - [`timestamp`] - Slack timestamp formatting

pub mod config;
pub mod error;
pub mod patterns;
pub mod search;
pub mod timestamp;

pub use config::{ChannelMap, ChannelRegistry, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use error::{FinderError, Result};
pub use patterns::{
    compile_repo_pattern, extract_pr_urls, is_review_request, MessageClassification, PrReference,
    GITHUB_PR_PATTERN, REVIEW_PATTERNS,
};
pub use search::{
    select_channels, SearchRequest, SearchSpec, DEFAULT_LOOKBACK_DAYS, DEFAULT_REPO_PATTERN,
    SEARCH_ACTION,
};
pub use timestamp::format_slack_timestamp;
