use serde::Deserialize;

/// One changed file in a pull request, as returned by the GitHub
/// pull-request-files endpoint. The API sends more fields (status,
/// additions, patch, ...); only the path is needed here and serde
/// ignores the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    /// Slash-delimited path relative to the repository root,
    /// deserialized from the API's `filename` key.
    pub filename: String,
}

/// Repository coordinates of a pull request, resolved from a PR URL
/// or from `--repo`/`--pr` flags before any request is made.
#[derive(Debug, Clone)]
pub struct PrRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}
