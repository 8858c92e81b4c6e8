use std::fmt;

use base64::Engine;

pub const DEFAULT_HOST: &str = "https://dev.azure.com";
pub const API_VERSION: &str = "7.1";

/// Organization, project and credential for one invocation. Built once from
/// configuration and only ever read afterwards.
#[derive(Clone)]
pub struct ClientSession {
    organization: String,
    project: String,
    base_url: String,
    auth_header: String,
}

impl ClientSession {
    pub fn new(host: &str, organization: String, project: String, token: &str) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!(":{token}"));
        Self {
            base_url: format!(
                "{}/{organization}/{project}/_apis",
                host.trim_end_matches('/')
            ),
            organization,
            project,
            auth_header: format!("Basic {encoded}"),
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// `https://<host>/<organization>/<project>/_apis`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value for the `Authorization` header: Basic auth with an empty user
    /// name and the access token as password.
    pub fn authorization(&self) -> &str {
        &self.auth_header
    }
}

impl fmt::Debug for ClientSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSession")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("base_url", &self.base_url)
            .field("auth_header", &"<redacted>")
            .finish()
    }
}
