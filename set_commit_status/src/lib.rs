//! Set a commit status on GitHub, authenticated as a GitHub App installation.
//!
//! ```no_run
//! # async fn example() -> Result<(), set_commit_status::Error> {
//! use domain::{CommitStatusOptions, ProcessEnvironment, StatusState};
//!
//! set_commit_status::set_commit_status(
//!     &CommitStatusOptions {
//!         owner: "organization".to_owned(),
//!         repo: "name".to_owned(),
//!         sha: "7638417db6d59f3c431d3e1f261cc637155684cd".to_owned(),
//!         state: Some(StatusState::Success),
//!         context: Some("ci/tests".to_owned()),
//!         description: Some("All tests passed".to_owned()),
//!         ..Default::default()
//!     },
//!     &ProcessEnvironment,
//! )
//! .await
//! # }
//! ```

mod cli;
pub mod config;
mod error;
pub mod logging;

use domain::{CommitStatusOptions, Environment, build::infer_build_url};
use source_control::{
    SourceControl, SourceControlInstallation,
    github::{DEFAULT_BASE_URL, GitHub, GitHubInstallation, error::GitHubError},
};
use tracing::{debug, info};

pub use cli::{Args, CliError, run};
pub use config::{ConfigError, InstallationParameters};
pub use error::Error;

/// Reads the App credentials from `environment` and sets the status through
/// the public GitHub API.
pub async fn set_commit_status(
    options: &CommitStatusOptions,
    environment: &impl Environment,
) -> Result<(), Error> {
    let parameters = InstallationParameters::from_environment(environment)?;
    let installation = create_installation_client(&parameters, DEFAULT_BASE_URL)?;

    set_status(options, environment, &installation).await?;

    Ok(())
}

/// Builds a client for one installation. Access tokens are requested lazily,
/// so the client can be reused for several statuses.
///
/// Must be called from within a tokio runtime.
pub fn create_installation_client(
    parameters: &InstallationParameters,
    base_url: &str,
) -> Result<GitHubInstallation, GitHubError> {
    let github = GitHub::build(parameters.app_id, &parameters.private_key, base_url)?;

    Ok(github.get_installation(parameters.installation_id))
}

/// Sends exactly one commit status. Without an explicit target url, the url of
/// the current CI build is used when it can be found in `environment`.
pub async fn set_status<I>(
    options: &CommitStatusOptions,
    environment: &impl Environment,
    installation: &I,
) -> Result<(), I::Error>
where
    I: SourceControlInstallation,
{
    debug!(?options, "setting commit status");

    let status = options.resolve(|| infer_build_url(environment));
    debug!(?status, "resolved commit status");

    installation.create_commit_status(&status).await?;

    info!(
        owner = %status.owner,
        repo = %status.repo,
        sha = %status.sha,
        state = %status.state,
        "created commit status"
    );
    if let Some(target_url) = &status.target_url {
        debug!("with details at {target_url}");
    }

    Ok(())
}
