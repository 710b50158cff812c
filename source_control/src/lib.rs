use std::future::Future;

use domain::CommitStatus;
use secrecy::SecretString;

pub trait SourceControl {
    type Installation: SourceControlInstallation;

    /// Binds the client to one installation. Nothing is requested until the
    /// installation is first used.
    fn get_installation(&self, installation_id: u64) -> Self::Installation;
}

pub trait SourceControlInstallation {
    type Error: std::error::Error;

    fn create_commit_status(
        &self,
        status: &CommitStatus,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Produces the `Authorization` header value for an outgoing request.
///
/// Called once per request that needs it, right before it is sent.
pub trait Credentials {
    type Error: std::error::Error;

    fn authorization(&self) -> impl Future<Output = Result<SecretString, Self::Error>> + Send;
}

pub mod github;
