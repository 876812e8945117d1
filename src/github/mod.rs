pub mod types;

pub use types::{ChangedFile, PrRef};

use crate::projects::distinct_top_level_projects;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

/// API root used when neither the config file nor GITHUB_API_URL says otherwise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: u32 = 100;

/// Ceiling on the pagination loop. GitHub lists at most 3000 files
/// per pull request (30 pages at 100 per page), so a run that reaches this
/// many pages is talking to an API that never terminates its listing.
const MAX_PAGES: u32 = 100;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("{0} must not be blank")]
    InvalidArgument(&'static str),

    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("GitHub API request failed with status {status} (page {page})")]
    RequestFailed { status: StatusCode, page: u32 },

    #[error("Failed to decode changed-files response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("File listing did not terminate within {0} pages")]
    PageLimit(u32),
}

/// Parse a GitHub PR URL into its component parts.
///
/// Expected path shape: /{owner}/{repo}/pull/{number}. The host is not
/// checked so GitHub Enterprise URLs resolve too.
pub fn parse_pr_url(url: &str) -> Result<PrRef, GithubError> {
    let parsed =
        reqwest::Url::parse(url).map_err(|_| GithubError::InvalidUrl(url.to_string()))?;

    let segments: Vec<_> = parsed
        .path_segments()
        .ok_or_else(|| GithubError::InvalidUrl(url.to_string()))?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 4 || segments[2] != "pull" {
        return Err(GithubError::InvalidUrl(url.to_string()));
    }

    let number = segments[3]
        .parse::<u64>()
        .map_err(|_| GithubError::InvalidUrl(url.to_string()))?;

    Ok(PrRef {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        number,
    })
}

/// Thin client for the pull-request-files endpoint.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    /// `api_url` is the API root (e.g. `https://api.github.com`); a trailing
    /// slash is tolerated.
    pub fn new(api_url: impl Into<String>) -> GithubClient {
        GithubClient {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the distinct top-level project directories touched by a pull
    /// request, in first-seen order across all pages of its file listing.
    ///
    /// Fails before any request is made when `owner` or `repo` is blank.
    /// Any non-success page response fails the whole call; accumulated
    /// partial results are discarded.
    #[instrument(skip(self, token), fields(owner = %owner, repo = %repo, pr = pr_number))]
    pub async fn changed_projects(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        token: &str,
    ) -> Result<Vec<String>, GithubError> {
        if owner.trim().is_empty() {
            return Err(GithubError::InvalidArgument("owner"));
        }
        if repo.trim().is_empty() {
            return Err(GithubError::InvalidArgument("repository name"));
        }

        let filenames = self.changed_filenames(owner, repo, pr_number, token).await?;
        debug!(files = filenames.len(), "collected changed files");

        Ok(distinct_top_level_projects(
            filenames.iter().map(String::as_str),
        ))
    }

    /// Fetch every page of the file listing and accumulate the filenames.
    /// A `null` or empty array body marks the end of the listing.
    async fn changed_filenames(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        token: &str,
    ) -> Result<Vec<String>, GithubError> {
        let endpoint = format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.api_url, owner, repo, pr_number
        );

        let mut filenames = Vec::new();
        let mut page: u32 = 1;
        loop {
            if page > MAX_PAGES {
                return Err(GithubError::PageLimit(MAX_PAGES));
            }

            let response = self
                .http
                .get(&endpoint)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .header("User-Agent", "pr-changed-projects")
                .header("Authorization", format!("token {token}"))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(GithubError::RequestFailed { status, page });
            }

            let body = response.text().await?;
            let files: Option<Vec<ChangedFile>> = serde_json::from_str(&body)?;
            match files {
                None => break,
                Some(files) if files.is_empty() => break,
                Some(files) => {
                    debug!(page, files = files.len(), "fetched changed-files page");
                    filenames.extend(files.into_iter().map(|f| f.filename));
                    page += 1;
                }
            }
        }

        Ok(filenames)
    }
}
