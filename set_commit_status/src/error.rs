use domain::UnknownStatusState;
use source_control::github::error::GitHubError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    GitHub(#[from] GitHubError),
    #[error(transparent)]
    State(#[from] UnknownStatusState),
}
