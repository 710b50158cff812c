use domain::Environment;
use secrecy::SecretString;
use thiserror::Error;

pub const GH_APP_ID: &str = "GH_APP_ID";
pub const GH_INSTALLATION_ID: &str = "GH_INSTALLATION_ID";
pub const GH_PRIVATE_KEY: &str = "GH_PRIVATE_KEY";

/// Everything needed to act as one installation of a GitHub App.
#[derive(Clone, Debug)]
pub struct InstallationParameters {
    pub app_id: u64,
    pub installation_id: u64,
    /// Base64 encoded PEM, as stored in the environment.
    pub private_key: SecretString,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing env variable {0}")]
    MissingVariable(&'static str),
    #[error("env variable {name} needs to be an integer, got `{value}`")]
    InvalidInteger { name: &'static str, value: String },
}

impl InstallationParameters {
    pub fn from_environment(environment: &impl Environment) -> Result<Self, ConfigError> {
        let app_id = parse_integer(GH_APP_ID, required(environment, GH_APP_ID)?)?;
        let installation_id = parse_integer(
            GH_INSTALLATION_ID,
            required(environment, GH_INSTALLATION_ID)?,
        )?;
        let private_key = SecretString::new(required(environment, GH_PRIVATE_KEY)?);

        Ok(InstallationParameters {
            app_id,
            installation_id,
            private_key,
        })
    }
}

fn required(environment: &impl Environment, name: &'static str) -> Result<String, ConfigError> {
    environment
        .non_empty(name)
        .ok_or(ConfigError::MissingVariable(name))
}

fn parse_integer(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInteger { name, value })
}
