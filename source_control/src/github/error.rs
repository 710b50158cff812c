use std::convert::Infallible;

use base64::DecodeError;
use jsonwebtoken::errors::Error as JwtError;
use octocrab::Error as OctocrabError;
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error(transparent)]
    Octocrab(#[from] OctocrabError),
    #[error(transparent)]
    JWT(#[from] JwtError),
    #[error(transparent)]
    UrlParse(#[from] ParseError),
    #[error("private key is not valid base64: {0}")]
    Base64(#[from] DecodeError),
}

impl From<Infallible> for GitHubError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
