use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::boards::session::DEFAULT_HOST;
use crate::boards::ClientSession;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub pat: Option<String>,
    pub host: Option<String>,
    /// File the values were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Values supplied on the command line or through the environment. These win
/// over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub pat: Option<String>,
    pub host: Option<String>,
}

impl AppConfig {
    pub fn session(self, overrides: Overrides) -> Result<ClientSession> {
        let source = self.source.as_deref();
        let organization = required(
            overrides.organization.or(self.organization),
            "organization",
            source,
        )?;
        let project = required(overrides.project.or(self.project), "project", source)?;
        let pat = required(overrides.pat.or(self.pat), "pat", source)?;
        let host = overrides
            .host
            .or(self.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(ClientSession::new(&host, organization, project, &pat))
    }
}

fn required(value: Option<String>, key: &str, source: Option<&Path>) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .with_context(|| match source {
            Some(path) => format!("Missing `{key}` in {}. Add it there or pass --{key}", path.display()),
            None => format!(
                "Missing `{key}`: no config file at {} or ./{LOCAL_CONFIG}. \
                 Config is TOML; config.yaml files are not read. Create one or pass --{key}",
                config_path().display()
            ),
        })
}

const LOCAL_CONFIG: &str = "config.toml";

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".azboards")
        .join("config.toml")
}

/// Load `~/.azboards/config.toml`, falling back to `./config.toml`. No file
/// at all yields an empty config.
pub fn load_config() -> Result<AppConfig> {
    let local = PathBuf::from(LOCAL_CONFIG);
    for path in [config_path(), local] {
        if path.exists() {
            return load_from(&path);
        }
    }
    Ok(AppConfig::default())
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let mut config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_session_from_file() {
        let file = write_config(
            r#"
organization = "contoso"
project = "Fabrikam"
pat = "abc123"
"#,
        );
        let config = load_from(file.path()).unwrap();
        let session = config.session(Overrides::default()).unwrap();
        assert_eq!(session.base_url(), "https://dev.azure.com/contoso/Fabrikam/_apis");
    }

    #[test]
    fn overrides_win_over_file() {
        let file = write_config(
            r#"
organization = "contoso"
project = "Fabrikam"
pat = "abc123"
host = "https://tfs.example.com"
"#,
        );
        let config = load_from(file.path()).unwrap();
        let session = config
            .session(Overrides {
                project: Some("Other".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.base_url(), "https://tfs.example.com/contoso/Other/_apis");
    }

    #[test]
    fn missing_token_names_the_key() {
        let config = AppConfig {
            organization: Some("contoso".into()),
            project: Some("Fabrikam".into()),
            ..Default::default()
        };
        let err = config.session(Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("`pat`"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = AppConfig {
            organization: Some("  ".into()),
            project: Some("Fabrikam".into()),
            pat: Some("abc".into()),
            ..Default::default()
        };
        let err = config.session(Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("`organization`"));
    }

    #[test]
    fn missing_key_names_the_file_it_was_read_from() {
        let file = write_config("organization = \"contoso\"\npat = \"abc\"\n");
        let config = load_from(file.path()).unwrap();
        let err = config.session(Overrides::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`project`"));
        assert!(msg.contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_key_without_file_mentions_toml_format() {
        let err = AppConfig::default()
            .session(Overrides::default())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`organization`"));
        assert!(msg.contains("TOML"));
        assert!(msg.contains("config.yaml"));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let file = write_config("organization = ");
        let err = load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
