use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Error,
    Failure,
    #[default]
    Pending,
    Success,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown commit status state `{0}`, expected one of error, failure, pending, success")]
pub struct UnknownStatusState(pub String);

impl StatusState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusState::Error => "error",
            StatusState::Failure => "failure",
            StatusState::Pending => "pending",
            StatusState::Success => "success",
        }
    }
}

impl FromStr for StatusState {
    type Err = UnknownStatusState;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "error" => Ok(StatusState::Error),
            "failure" => Ok(StatusState::Failure),
            "pending" => Ok(StatusState::Pending),
            "success" => Ok(StatusState::Success),
            _ => Err(UnknownStatusState(value.to_owned())),
        }
    }
}

impl Display for StatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a caller asks for when setting a commit status.
///
/// `sha` is the full 40 character commit hash. Optional fields left empty are
/// treated as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitStatusOptions {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub state: Option<StatusState>,
    pub context: Option<String>,
    pub target_url: Option<String>,
    pub description: Option<String>,
}

/// A commit status ready to be sent, with every default applied.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CommitStatus {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub state: StatusState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl CommitStatusOptions {
    /// Applies defaults. `infer_target_url` is only consulted when no explicit
    /// target url was given.
    pub fn resolve(&self, infer_target_url: impl FnOnce() -> Option<String>) -> CommitStatus {
        let target_url = non_empty(&self.target_url).or_else(infer_target_url);

        CommitStatus {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            sha: self.sha.clone(),
            state: self.state.unwrap_or_default(),
            target_url,
            description: non_empty(&self.description),
            context: non_empty(&self.context),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|value| !value.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn options() -> CommitStatusOptions {
        CommitStatusOptions {
            owner: "org".to_owned(),
            repo: "name".to_owned(),
            sha: "7638417db6d59f3c431d3e1f261cc637155684cd".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn resolve_should_default_to_pending() {
        let status = options().resolve(|| None);

        assert_eq!(
            status,
            CommitStatus {
                owner: "org".to_owned(),
                repo: "name".to_owned(),
                sha: "7638417db6d59f3c431d3e1f261cc637155684cd".to_owned(),
                state: StatusState::Pending,
                target_url: None,
                description: None,
                context: None,
            }
        );
    }

    #[test]
    fn resolve_should_keep_given_state() {
        let options = CommitStatusOptions {
            state: Some(StatusState::Failure),
            ..options()
        };

        assert_eq!(options.resolve(|| None).state, StatusState::Failure);
    }

    #[test]
    fn resolve_should_prefer_explicit_target_url() {
        let options = CommitStatusOptions {
            target_url: Some("https://ci.example/build/7".to_owned()),
            ..options()
        };

        let status = options.resolve(|| panic!("inference must not run"));

        assert_eq!(
            status.target_url,
            Some("https://ci.example/build/7".to_owned())
        );
    }

    #[test]
    fn resolve_should_fall_back_to_inferred_target_url() {
        let options = CommitStatusOptions {
            target_url: Some(String::new()),
            ..options()
        };

        let status = options.resolve(|| Some("https://circleci.example/job/1".to_owned()));

        assert_eq!(
            status.target_url,
            Some("https://circleci.example/job/1".to_owned())
        );
    }

    #[test]
    fn resolve_should_drop_empty_description_and_context() {
        let options = CommitStatusOptions {
            description: Some(String::new()),
            context: Some("ci/tests".to_owned()),
            ..options()
        };

        let status = options.resolve(|| None);

        assert_eq!(status.description, None);
        assert_eq!(status.context, Some("ci/tests".to_owned()));
    }

    #[test]
    fn parse_status_state() {
        assert_eq!("success".parse::<StatusState>(), Ok(StatusState::Success));
        assert_eq!("error".parse::<StatusState>(), Ok(StatusState::Error));
        assert_eq!(
            "passed".parse::<StatusState>(),
            Err(UnknownStatusState("passed".to_owned()))
        );
    }

    #[test]
    fn serialize_commit_status_without_optional_fields() {
        let status = options().resolve(|| None);

        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({
                "owner": "org",
                "repo": "name",
                "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
                "state": "pending"
            })
        );
    }

    #[test]
    fn deserialize_status_state() {
        let state: StatusState = serde_json::from_str(r#""failure""#).unwrap();
        assert_eq!(state, StatusState::Failure);
    }
}
