//! GitHub REST access for issue listings and timelines.
//!
//! Defines the [`IssueTracker`] trait that the sync engine depends on,
//! plus [`GitHubClient`], the production implementation backed by
//! `reqwest`. Tests substitute [`tests::MockTracker`] to exercise the
//! engine without network access.
//!
//! Pagination follows the `Link` response header: a page carries the
//! number of its successor when the header advertises `rel="next"`, and
//! nothing otherwise.

use std::time::Duration;

use reqwest::{header, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{Issue, Page, TimelineEvent, TrackerError};

/// Root URL of the hosted GitHub REST API.
pub const GITHUB_API_ROOT: &str = "https://api.github.com";

/// Default repository owner to sync from.
pub const DEFAULT_OWNER: &str = "openshift";

/// Default repository name to sync from.
pub const DEFAULT_REPO: &str = "origin";

/// Default label selecting flaky-test issues.
pub const DEFAULT_FLAKE_LABEL: &str = "kind/test-flake";

/// Default number of entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type GitHub wants in the `Accept` header.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// User agent for API requests (GitHub rejects anonymous clients).
const USER_AGENT: &str = concat!("flakewatch/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Tracker trait
// ============================================================================

/// Read access to an issue tracker.
///
/// The sync engine only ever lists flaky-test issues and walks their
/// timelines, so that is the whole seam. Implementations must be safe
/// to share across worker tasks.
pub trait IssueTracker: Send + Sync + 'static {
    /// Fetch one page of open flaky-test issues in the tracker's
    /// creation-sorted order.
    ///
    /// Pages are numbered from 1.
    fn list_flake_issues(
        &self,
        page: u32,
    ) -> impl std::future::Future<Output = Result<Page<Issue>, TrackerError>> + Send;

    /// Fetch one page of the timeline of issue `number`.
    ///
    /// Pages are numbered from 1.
    fn list_timeline(
        &self,
        number: u64,
        page: u32,
    ) -> impl std::future::Future<Output = Result<Page<TimelineEvent>, TrackerError>> + Send;
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for [`GitHubClient`].
///
/// # Example
///
/// ```
/// use flakewatch::tracker::GitHubConfig;
///
/// let config = GitHubConfig::new()
///     .with_repository("kubernetes", "kubernetes")
///     .with_label("kind/flake")
///     .with_token("ghp_example".to_string());
///
/// assert_eq!(config.owner(), "kubernetes");
/// assert_eq!(config.label(), "kind/flake");
/// ```
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root, overridable for self-hosted instances
    api_root: String,
    /// Repository owner
    owner: String,
    /// Repository name
    repo: String,
    /// Label that marks an issue as a flake report
    label: String,
    /// Bearer token, if the caller has one
    token: Option<String>,
    /// Entries requested per page
    page_size: u32,
    /// HTTP timeout in seconds
    timeout_secs: u64,
}

impl GitHubConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            api_root: GITHUB_API_ROOT.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            label: DEFAULT_FLAKE_LABEL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the API root URL.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Set the repository to sync from.
    pub fn with_repository(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.repo = repo.into();
        self
    }

    /// Set the label selecting flaky-test issues.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the bearer token used for authenticated requests.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the number of entries requested per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the HTTP timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Get the API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Get the flake label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the bearer token, if configured.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get the page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Get the HTTP timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Production client
// ============================================================================

/// GitHub REST client implementing [`IssueTracker`].
pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Http`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: GitHubConfig) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TrackerError::Http {
                url: config.api_root().to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    fn issues_url(&self, page: u32) -> Result<String, TrackerError> {
        let mut url = endpoint(format!(
            "{}/repos/{}/{}/issues",
            self.config.api_root(),
            self.config.owner(),
            self.config.repo()
        ))?;
        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("labels", self.config.label())
            .append_pair("sort", "created")
            .append_pair("per_page", &self.config.page_size().to_string())
            .append_pair("page", &page.to_string());
        Ok(url.to_string())
    }

    fn timeline_url(&self, number: u64, page: u32) -> Result<String, TrackerError> {
        let mut url = endpoint(format!(
            "{}/repos/{}/{}/issues/{}/timeline",
            self.config.api_root(),
            self.config.owner(),
            self.config.repo(),
            number
        ))?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.config.page_size().to_string())
            .append_pair("page", &page.to_string());
        Ok(url.to_string())
    }

    /// Perform a GET and decode one page of results.
    ///
    /// The `Link` header is read before the body is consumed, since
    /// decoding takes ownership of the response.
    async fn get_page<T: DeserializeOwned>(&self, url: String) -> Result<Page<T>, TrackerError> {
        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE);

        if let Some(token) = self.config.token() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| TrackerError::Http {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let next_page = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_next_page);

        let items: Vec<T> = response.json().await.map_err(|e| TrackerError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!(url = %url, items = items.len(), next_page, "fetched tracker page");

        Ok(Page { items, next_page })
    }
}

impl IssueTracker for GitHubClient {
    async fn list_flake_issues(&self, page: u32) -> Result<Page<Issue>, TrackerError> {
        self.get_page(self.issues_url(page)?).await
    }

    async fn list_timeline(&self, number: u64, page: u32) -> Result<Page<TimelineEvent>, TrackerError> {
        self.get_page(self.timeline_url(number, page)?).await
    }
}

/// Parse a formatted endpoint path into a [`Url`] so query parameters
/// can be appended with proper percent-encoding. Labels in particular
/// may contain spaces or `&` and must never reach the query string raw.
fn endpoint(base: String) -> Result<Url, TrackerError> {
    Url::parse(&base).map_err(|e| TrackerError::Http {
        url: base,
        message: format!("invalid request URL: {}", e),
    })
}

/// Extract the next page number from a `Link` response header.
///
/// GitHub formats the header as comma-separated entries like
/// `<https://api.github.com/...?page=4>; rel="next"`. Returns `None`
/// when no entry carries `rel="next"` or its URL has no usable `page`
/// parameter.
fn parse_next_page(link: &str) -> Option<u32> {
    for entry in link.split(',') {
        let mut sections = entry.split(';');
        let target = sections.next().unwrap_or("").trim();

        if !sections.any(|section| section.trim() == r#"rel="next""#) {
            continue;
        }

        let url = target.trim_start_matches('<').trim_end_matches('>');
        let Some((_, query)) = url.split_once('?') else {
            continue;
        };

        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("page=") {
                return value.parse().ok();
            }
        }
    }

    None
}

// ============================================================================
// Tests
// ============================================================================
