use clap::Parser;
use domain::{CommitStatusOptions, Environment, StatusState};
use source_control::github::DEFAULT_BASE_URL;
use thiserror::Error;

use crate::{Error, InstallationParameters, create_installation_client, set_status};

/// Set a commit status on GitHub as a GitHub App installation.
///
/// The App is read from GH_APP_ID, GH_INSTALLATION_ID and GH_PRIVATE_KEY
/// (base64 encoded PEM).
#[derive(Parser, Debug)]
#[command(name = "set-commit-status", version)]
pub struct Args {
    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,
    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,
    /// Full commit sha
    #[arg(long)]
    pub sha: Option<String>,
    /// One of error, failure, pending or success [default: pending]
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Details url, defaults to the current CircleCI or AppVeyor build
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
    /// GitHub API root, for GitHub Enterprise Server
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing {0}")]
    MissingFlag(&'static str),
    #[error(transparent)]
    Failed(#[from] Error),
}

impl Args {
    /// Fails on the first of `--owner`, `--repo` and `--sha` that is missing.
    pub fn check_required(&self) -> Result<(), CliError> {
        required(self.owner.clone(), "--owner name")?;
        required(self.repo.clone(), "--repo name")?;
        required(self.sha.clone(), "--sha")?;

        Ok(())
    }
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingFlag(_) => 1,
            CliError::Failed(_) => 2,
        }
    }
}

/// Validates the flags, then resolves the App from `environment` and sends
/// the status.
pub async fn run(args: Args, environment: &impl Environment) -> Result<(), CliError> {
    let Args {
        owner,
        repo,
        sha,
        state,
        description,
        url,
        context,
        api_url,
    } = args;

    let options = CommitStatusOptions {
        owner: required(owner, "--owner name")?,
        repo: required(repo, "--repo name")?,
        sha: required(sha, "--sha")?,
        state: None,
        context,
        target_url: url,
        description,
    };

    execute(options, state.as_deref(), &api_url, environment).await?;

    Ok(())
}

async fn execute(
    mut options: CommitStatusOptions,
    state: Option<&str>,
    api_url: &str,
    environment: &impl Environment,
) -> Result<(), Error> {
    let parameters = InstallationParameters::from_environment(environment)?;
    let installation = create_installation_client(&parameters, api_url)?;

    options.state = parse_state(state)?;

    set_status(&options, environment, &installation).await?;

    Ok(())
}

fn required(value: Option<String>, flag: &'static str) -> Result<String, CliError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(CliError::MissingFlag(flag))
}

fn parse_state(state: Option<&str>) -> Result<Option<StatusState>, Error> {
    Ok(state
        .filter(|state| !state.is_empty())
        .map(str::parse::<StatusState>)
        .transpose()?)
}
