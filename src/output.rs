use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::github::PrRef;

/// Name of the workflow step output consumed by downstream jobs.
const STEP_OUTPUT_NAME: &str = "changed-projects";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write step output: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to encode project list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Print the project list to stdout in the selected mode, then mirror it
/// into the GITHUB_OUTPUT file when running as a workflow step.
#[instrument(skip(pr, projects), fields(projects = projects.len()))]
pub fn emit(pr: &PrRef, projects: &[String], json: bool) -> Result<(), OutputError> {
    if json {
        print_json(projects)?;
    } else {
        print_terminal(pr, projects);
    }

    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        debug!(path = %path, "appending step output");
        write_github_output(Path::new(&path), projects)?;
    }

    Ok(())
}

/// Human-readable listing with a colored header.
fn print_terminal(pr: &PrRef, projects: &[String]) {
    println!();
    println!(
        "PR #{} in {}/{}",
        pr.number,
        pr.owner.bold(),
        pr.repo.bold()
    );

    if projects.is_empty() {
        println!("No changed files.");
    } else {
        let noun = if projects.len() == 1 {
            "project"
        } else {
            "projects"
        };
        println!("{} changed {}:", projects.len().to_string().bold(), noun);
        for project in projects {
            println!("  • {}", project.cyan());
        }
    }
    println!();
}

/// Machine-readable mode: exactly one JSON array on stdout.
fn print_json(projects: &[String]) -> Result<(), OutputError> {
    println!("{}", serde_json::to_string(projects)?);
    Ok(())
}

/// Append a `changed-projects=<json>` line to the workflow output file.
/// The file already holds outputs from earlier steps, so append, never
/// truncate.
fn write_github_output(path: &Path, projects: &[String]) -> Result<(), OutputError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{}={}",
        STEP_OUTPUT_NAME,
        serde_json::to_string(projects)?
    )?;
    Ok(())
}
