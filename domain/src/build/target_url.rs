//! Where to see more details about a build, guessed from CI environment variables.
//!
//! CircleCI: <https://circleci.com/docs/2.0/env-vars/>
//! AppVeyor: <https://www.appveyor.com/docs/environment-variables/>

use tracing::warn;

use crate::Environment;

pub const CIRCLE_BUILD_URL: &str = "CIRCLE_BUILD_URL";
pub const APPVEYOR: &str = "APPVEYOR";
pub const APPVEYOR_URL: &str = "APPVEYOR_URL";
pub const APPVEYOR_ACCOUNT_NAME: &str = "APPVEYOR_ACCOUNT_NAME";
pub const APPVEYOR_PROJECT_SLUG: &str = "APPVEYOR_PROJECT_SLUG";
pub const APPVEYOR_BUILD_ID: &str = "APPVEYOR_BUILD_ID";

/// Returns the url of the current build job, if the CI we run on is known.
pub fn infer_build_url(environment: &impl Environment) -> Option<String> {
    environment
        .non_empty(CIRCLE_BUILD_URL)
        .or_else(|| appveyor_build_url(environment))
}

fn appveyor_build_url(environment: &impl Environment) -> Option<String> {
    environment.non_empty(APPVEYOR)?;

    let (Some(url), Some(account_name), Some(project_slug), Some(build_id)) = (
        environment.non_empty(APPVEYOR_URL),
        environment.non_empty(APPVEYOR_ACCOUNT_NAME),
        environment.non_empty(APPVEYOR_PROJECT_SLUG),
        environment.non_empty(APPVEYOR_BUILD_ID),
    ) else {
        warn!("cannot find build environment variables on AppVeyor CI");
        return None;
    };

    Some(format!(
        "{url}/project/{account_name}/{project_slug}/builds/{build_id}"
    ))
}
