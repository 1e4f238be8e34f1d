use crate::error::{BadEnvVarSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;

/// Where the student REST backend lives.
///
/// `ROSTER_API_URL` is optional and defaults to the local development
/// backend, mirroring the proxy the original frontend shipped with.
const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_base_url: String,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        const NAME: &str = "ROSTER_API_URL";
        let api_base_url = match var(NAME) {
            Ok(url) => url,
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => {
                DEFAULT_API_URL.to_string()
            }
            Err(source) => return Err(source).context(BadEnvVarSnafu { name: NAME }),
        };

        Ok(Self { api_base_url })
    }

    #[must_use]
    pub fn from_api_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}
