pub mod error;

use std::convert::Infallible;

use crate::{Credentials, SourceControl, SourceControlInstallation};
use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use domain::{CommitStatus, StatusState};
use http::header::AUTHORIZATION;
use jsonwebtoken::EncodingKey;
use octocrab::{
    Octocrab,
    models::{self, AppId, InstallationId},
    service::middleware::retry::RetryConfig,
};
use secrecy::{ExposeSecret, SecretString, SecretVec};
use tracing::debug;
use url::Url;

use self::error::GitHubError;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Standard alphabet with optional padding. URL-safe input is mapped onto it first.
const PRIVATE_KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A client authenticated as a GitHub App.
///
/// Building it spawns the HTTP service on the current tokio runtime.
pub struct GitHub {
    octocrab: Octocrab,
    base_url: Url,
}

impl GitHub {
    /// `private_key` is the base64 encoded PEM of the App's RSA private key.
    pub fn build(
        app_id: u64,
        private_key: &SecretString,
        base_url: &str,
    ) -> Result<Self, GitHubError> {
        let base_url = Url::parse(base_url)?;
        let private_key = decode_private_key(private_key)?;

        let mut builder = Octocrab::builder().base_uri(base_uri(&base_url))?;
        builder.add_retry_config(RetryConfig::None);
        let octocrab = builder
            .app(
                AppId(app_id),
                EncodingKey::from_rsa_pem(private_key.expose_secret())?,
            )
            .build()?;

        Ok(Self { octocrab, base_url })
    }
}

fn base_uri(base_url: &Url) -> &str {
    base_url.as_str().trim_end_matches('/')
}

fn decode_private_key(private_key: &SecretString) -> Result<SecretVec<u8>, GitHubError> {
    let encoded = private_key
        .expose_secret()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect::<String>();

    Ok(SecretVec::new(PRIVATE_KEY_ENGINE.decode(encoded)?))
}

impl SourceControl for GitHub {
    type Installation = GitHubInstallation;

    fn get_installation(&self, installation_id: u64) -> Self::Installation {
        GitHubInstallation::new(
            self.base_url.clone(),
            InstallationToken {
                app: self.octocrab.clone(),
                installation_id: InstallationId(installation_id),
            },
        )
    }
}

/// Installation access tokens, exchanged by the App client on demand.
#[derive(Clone)]
pub struct InstallationToken {
    app: Octocrab,
    installation_id: InstallationId,
}

impl Credentials for InstallationToken {
    type Error = GitHubError;

    async fn authorization(&self) -> Result<SecretString, Self::Error> {
        debug!(
            installation_id = self.installation_id.0,
            "requesting installation access token"
        );

        let (_, token) = self
            .app
            .installation_and_token(self.installation_id)
            .await?;

        Ok(token_header(&token))
    }
}

/// A token known up front, e.g. a personal access token.
#[derive(Clone)]
pub struct StaticToken(SecretString);

impl StaticToken {
    pub fn new(token: SecretString) -> Self {
        Self(token)
    }
}

impl Credentials for StaticToken {
    type Error = Infallible;

    async fn authorization(&self) -> Result<SecretString, Self::Error> {
        Ok(token_header(&self.0))
    }
}

fn token_header(token: &SecretString) -> SecretString {
    SecretString::new(format!("token {}", token.expose_secret()))
}

#[derive(Clone)]
pub struct GitHubInstallation<C = InstallationToken> {
    base_url: Url,
    credentials: C,
}

impl<C> GitHubInstallation<C> {
    pub fn new(base_url: Url, credentials: C) -> Self {
        Self {
            base_url,
            credentials,
        }
    }
}

impl<C> SourceControlInstallation for GitHubInstallation<C>
where
    C: Credentials + Sync,
    GitHubError: From<C::Error>,
{
    type Error = GitHubError;

    async fn create_commit_status(&self, status: &CommitStatus) -> Result<(), Self::Error> {
        let authorization = self.credentials.authorization().await?;

        let mut builder = Octocrab::builder().base_uri(base_uri(&self.base_url))?;
        builder.add_retry_config(RetryConfig::None);
        let octocrab = builder
            .add_header(AUTHORIZATION, authorization.expose_secret().to_owned())
            .build()?;

        let repos = octocrab.repos(&status.owner, &status.repo);
        let mut request = repos.create_status(status.sha.clone(), status_state(status.state));

        if let Some(target_url) = &status.target_url {
            request = request.target(target_url.clone());
        }
        if let Some(description) = &status.description {
            request = request.description(description.clone());
        }
        if let Some(context) = &status.context {
            request = request.context(context.clone());
        }

        request.send().await?;

        Ok(())
    }
}

fn status_state(state: StatusState) -> models::StatusState {
    match state {
        StatusState::Error => models::StatusState::Error,
        StatusState::Failure => models::StatusState::Failure,
        StatusState::Pending => models::StatusState::Pending,
        StatusState::Success => models::StatusState::Success,
    }
}
