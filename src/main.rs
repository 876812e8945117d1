mod config;
mod github;
mod output;
mod projects;

use clap::Parser;
use github::{GithubClient, PrRef};
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// pr-changed-projects — resolves which top-level monorepo projects a GitHub
/// Pull Request touches, for CI steps that fan out work per project.
#[derive(Parser, Debug)]
#[command(name = "pr-changed-projects", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/org/repo/pull/42)
    ///
    /// Not required when --repo/--pr are used.
    pr_url: Option<String>,

    /// Repository in owner/name form (falls back to GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Pull request number (used with --repo)
    #[arg(long)]
    pr: Option<u64>,

    /// Print the project list as a JSON array
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pr = resolve_target(&cli)?;
    let _main_span =
        info_span!("changed_projects", owner = %pr.owner, repo = %pr.repo, pr = pr.number)
            .entered();

    info!("loading configuration");
    let config = config::Config::load()?;
    let token = config.github_token().ok_or(
        "GitHub token not found. Set GITHUB_TOKEN or [github] token in .pr-changed-projects.toml",
    )?;

    info!("fetching changed files from GitHub");
    let client = GithubClient::new(config.api_url());
    let projects = client
        .changed_projects(&pr.owner, &pr.repo, pr.number, &token)
        .await?;
    info!(projects = projects.len(), "resolved changed projects");

    output::emit(&pr, &projects, cli.json)?;

    Ok(())
}

/// Resolve the target pull request from the URL argument, the --repo/--pr
/// flags, or the GITHUB_REPOSITORY environment on an Actions runner.
fn resolve_target(cli: &Cli) -> Result<PrRef, Box<dyn std::error::Error>> {
    if let Some(url) = cli.pr_url.as_deref() {
        debug!("parsing PR URL");
        return Ok(github::parse_pr_url(url)?);
    }

    let number = cli.pr.ok_or(
        "PR number is required unless a URL is given. \
         Usage: pr-changed-projects <URL> or pr-changed-projects --repo owner/name --pr 42",
    )?;

    let repo = match cli.repo.clone() {
        Some(repo) => repo,
        None => std::env::var("GITHUB_REPOSITORY").map_err(|_| {
            "Repository not specified. Pass --repo owner/name or set GITHUB_REPOSITORY"
        })?,
    };

    // Blank halves are caught by the resolver's own validation.
    let (owner, name) = repo.split_once('/').unwrap_or((repo.as_str(), ""));
    Ok(PrRef {
        owner: owner.to_string(),
        repo: name.to_string(),
        number,
    })
}
