use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable holding the bearer token
pub const API_TOKEN_ENV: &str = "FOLDERTUI_API_TOKEN";
/// Environment variable holding the login password
pub const PASSWORD_ENV: &str = "FOLDERTUI_PASSWORD";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// File whose trimmed contents are the bearer token
    #[serde(default)]
    pub api_token_file: Option<PathBuf>,
    #[serde(default)]
    pub vim_mode: bool,
}

impl Config {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Invalid config file")
    }

    /// Bearer token from the environment, else from `api_token_file`
    pub fn resolve_api_token(&self) -> Result<Option<String>> {
        self.resolve_api_token_with(std::env::var(API_TOKEN_ENV).ok())
    }

    fn resolve_api_token_with(&self, from_env: Option<String>) -> Result<Option<String>> {
        if let Some(token) = non_empty(from_env) {
            return Ok(Some(token));
        }

        let Some(path) = &self.api_token_file else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read api_token_file {}", path.display()))?;

        Ok(non_empty(Some(raw)))
    }

    /// Login password from the environment, else from the config file
    pub fn resolve_password(&self) -> Option<String> {
        non_empty(std::env::var(PASSWORD_ENV).ok()).or_else(|| non_empty(self.password.clone()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Find the config file: `--config`, then the platform config dir, then `./config.yaml`
pub fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    // If CLI argument provided, use it
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    // Try ~/.config/foldertui/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("foldertui").join("config.yaml");
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = match dirs::config_dir() {
        Some(config_dir) => config_dir
            .join("foldertui")
            .join("config.yaml")
            .display()
            .to_string(),
        None => "~/.config/foldertui/config.yaml".to_string(),
    };

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location.",
        expected_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config() {
        let config = Config::from_yaml("base_url: http://localhost:5000\n").unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert!(config.username.is_none());
        assert!(!config.vim_mode);
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        assert!(Config::from_yaml("vim_mode: true\n").is_err());
    }

    #[test]
    fn test_token_prefers_environment() {
        let config = Config::from_yaml("base_url: http://x\napi_token_file: /does/not/exist\n").unwrap();
        let token = config
            .resolve_api_token_with(Some("from-env".to_string()))
            .unwrap();
        assert_eq!(token.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_token_from_file_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  secret-token  ").unwrap();

        let config = Config {
            base_url: "http://x".to_string(),
            username: None,
            password: None,
            api_token_file: Some(file.path().to_path_buf()),
            vim_mode: false,
        };
        let token = config.resolve_api_token_with(None).unwrap();
        assert_eq!(token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_unreadable_token_file_is_an_error() {
        let config = Config::from_yaml("base_url: http://x\napi_token_file: /does/not/exist\n").unwrap();
        assert!(config.resolve_api_token_with(None).is_err());
    }

    #[test]
    fn test_no_token_configured() {
        let config = Config::from_yaml("base_url: http://x\n").unwrap();
        assert!(config.resolve_api_token_with(Some("  ".to_string())).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_config_path() {
        let err = get_config_path(Some("/does/not/exist.yaml".to_string())).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist.yaml"));
    }
}
