//! # Review Request Heuristics
//!
//! Stateless predicates over Slack message text: does this message look like
//! someone asking for a PR review, and which GitHub PR URLs does it mention?
//!
//! The pattern table is a plain keyword list with no scoring. Loose entries
//! like `thoughts\?` will flag messages that have nothing to do with reviews.
//!
//! ## Example
//!
//! ```
//! use pr_review_finder::{extract_pr_urls, is_review_request};
//!
//! let text = "PTAL https://github.com/acme/api/pull/42";
//! assert!(is_review_request(text));
//! assert_eq!(
//!     extract_pr_urls(text, None),
//!     vec!["https://github.com/acme/api/pull/42"]
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{FinderError, Result};

/// Phrases people use when asking for a review, in match order.
pub const REVIEW_PATTERNS: &[&str] = &[
    r"👀",
    r":eyes:",
    r"eyes on",
    r"review",
    r"please.*look",
    r"look.*at",
    r"need.*review",
    r"can.*someone",
    r"anyone.*review",
    r"could.*get",
    r"would.*appreciate",
    r"help.*review",
    r"waiting.*review",
    r"blocked.*review",
    r"ready.*review",
    r"PTAL", // Please Take A Look
    r"lgtm\?",
    r"thoughts\?",
];

/// Shape of a GitHub pull request URL
pub const GITHUB_PR_PATTERN: &str = r"https?://github\.com/[^/]+/[^/]+/pull/\d+";

static REVIEW_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    REVIEW_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
});

static GITHUB_PR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(GITHUB_PR_PATTERN).unwrap());

static PR_PARTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+)/pull/(?P<number>\d+)$")
        .unwrap()
});

/// Check if message text looks like a PR review request
#[must_use]
pub fn is_review_request(text: &str) -> bool {
    REVIEW_REGEXES.iter().any(|re| re.is_match(text))
}

/// Extract GitHub PR URLs from message text, in order of appearance.
///
/// When `repo_filter` is given, only URLs it matches are kept.
#[must_use]
pub fn extract_pr_urls(text: &str, repo_filter: Option<&Regex>) -> Vec<String> {
    GITHUB_PR_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| repo_filter.is_none_or(|re| re.is_match(url)))
        .map(str::to_string)
        .collect()
}

/// Compile a user-supplied repo pattern.
///
/// # Errors
///
/// Returns `InvalidRepoPattern` if `pattern` is not a valid regex.
pub fn compile_repo_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| FinderError::InvalidRepoPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A PR URL split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrReference {
    /// Full PR URL
    pub url: String,

    /// Repository owner (user or org)
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Pull request number
    pub number: u64,
}

impl PrReference {
    /// Parse a GitHub PR URL such as `https://github.com/acme/api/pull/42`
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let caps = PR_PARTS_REGEX.captures(url)?;
        Some(Self {
            url: url.to_string(),
            owner: caps["owner"].to_string(),
            repo: caps["repo"].to_string(),
            number: caps["number"].parse().ok()?,
        })
    }

    /// `owner/repo#number`
    #[must_use]
    pub fn short_name(&self) -> String {
        format!("{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Heuristic verdict for a single message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageClassification {
    /// Whether any review pattern matched
    pub is_review_request: bool,

    /// PR URLs found in the message (after repo filtering)
    pub pr_urls: Vec<String>,
}

impl MessageClassification {
    /// Classify message text
    #[must_use]
    pub fn classify(text: &str, repo_filter: Option<&Regex>) -> Self {
        Self {
            is_review_request: is_review_request(text),
            pr_urls: extract_pr_urls(text, repo_filter),
        }
    }

    /// A review request that also links at least one PR
    #[must_use]
    pub fn is_pr_review_request(&self) -> bool {
        self.is_review_request && !self.pr_urls.is_empty()
    }

    /// Parsed form of each PR URL
    #[must_use]
    pub fn pr_references(&self) -> Vec<PrReference> {
        self.pr_urls
            .iter()
            .filter_map(|url| PrReference::parse(url))
            .collect()
    }
}
