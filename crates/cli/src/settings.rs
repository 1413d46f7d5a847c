//! CLI settings.
//!
//! Settings are loaded from a TOML file merged with environment variables
//! prefixed with `MYRA__`. For example, `MYRA__CREDENTIALS__SECRET` overrides
//! `credentials.secret` in the TOML file. A missing file is not an error, so
//! credentials can be supplied through the environment alone.

use std::fmt;
use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use myra_signature::Credentials;
use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "myra.toml";
pub const DEFAULT_BASE_URL: &str = "https://api.myracloud.com";

#[derive(Deserialize, Validate)]
pub struct CredentialSettings {
    #[validate(length(min = 1))]
    pub secret: String,
    #[validate(length(min = 1))]
    pub api_key: String,
}

impl fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("secret", &"<redacted>")
            .field("api_key", &self.api_key)
            .finish()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApiSettings {
    #[validate(url)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub credentials: CredentialSettings,
    #[validate(nested)]
    pub api: ApiSettings,
}

impl Settings {
    /// Loads settings from `path` (optional) and the environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .add_source(toml)
            .add_source(Self::environment())
            .build()?;

        config.try_deserialize()
    }

    fn environment() -> Environment {
        Environment::default().prefix("MYRA").separator("__")
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.credentials.secret, &self.credentials.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_TOML: &str = r#"
        [credentials]
        secret = "file-secret"
        api_key = "file-key"

        [api]
        base_url = "https://apiv2.example.com"
        "#;

    const ENV_KEYS: [&str; 3] = [
        "MYRA__CREDENTIALS__SECRET",
        "MYRA__CREDENTIALS__API_KEY",
        "MYRA__API__BASE_URL",
    ];

    fn parse(toml_str: &str) -> Result<Settings, ConfigError> {
        temp_env::with_vars_unset(ENV_KEYS, || Settings::from_toml(toml_str))
    }

    #[test]
    fn test_settings_from_valid_toml() {
        let settings = parse(VALID_TOML).expect("should parse settings");

        assert_eq!(settings.credentials.secret, "file-secret");
        assert_eq!(settings.credentials.api_key, "file-key");
        assert_eq!(settings.api.base_url, "https://apiv2.example.com");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_default_base_url() {
        let toml_str = r#"
            [credentials]
            secret = "s"
            api_key = "k"
            "#;

        let settings = parse(toml_str).expect("should parse settings");
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_settings_missing_credentials() {
        let toml_str = r#"
            [api]
            base_url = "https://api.myracloud.com"
            "#;

        assert!(parse(toml_str).is_err());
    }

    #[test]
    fn test_settings_validation_rejects_empty_values() {
        let toml_str = r#"
            [credentials]
            secret = ""
            api_key = "k"

            [api]
            base_url = "not a url"
            "#;

        let settings = parse(toml_str).expect("should parse settings");
        let errors = settings.validate().expect_err("should fail validation");
        let message = errors.to_string();
        assert!(message.contains("secret"), "unexpected errors: {message}");
        assert!(message.contains("base_url"), "unexpected errors: {message}");
    }

    #[test]
    fn test_settings_environment_overrides_file() {
        temp_env::with_vars(
            [
                ("MYRA__CREDENTIALS__SECRET", Some("env-secret")),
                ("MYRA__CREDENTIALS__API_KEY", None::<&str>),
                ("MYRA__API__BASE_URL", None),
            ],
            || {
                let settings = Settings::from_toml(VALID_TOML).expect("should parse settings");
                assert_eq!(settings.credentials.secret, "env-secret");
                assert_eq!(settings.credentials.api_key, "file-key");
            },
        );
    }

    #[test]
    fn test_settings_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("should create temp file");
        file.write_all(VALID_TOML.as_bytes())
            .expect("should write config");

        let settings = temp_env::with_vars_unset(ENV_KEYS, || Settings::load(file.path()))
            .expect("should load settings");
        assert_eq!(settings.credentials.api_key, "file-key");
    }

    #[test]
    fn test_settings_load_from_environment_only() {
        temp_env::with_vars(
            [
                ("MYRA__CREDENTIALS__SECRET", Some("env-secret")),
                ("MYRA__CREDENTIALS__API_KEY", Some("env-key")),
                ("MYRA__API__BASE_URL", None),
            ],
            || {
                let settings = Settings::load(Path::new("does-not-exist.toml"))
                    .expect("should load settings from environment");
                assert_eq!(settings.credentials.secret, "env-secret");
                assert_eq!(settings.credentials.api_key, "env-key");
                assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
            },
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = parse(VALID_TOML).expect("should parse settings");
        let debug = format!("{settings:?}");
        assert!(!debug.contains("file-secret"));
        assert!(debug.contains("file-key"));
    }

    #[test]
    fn test_credentials_from_settings() {
        let settings = parse(VALID_TOML).expect("should parse settings");
        let credentials = settings.credentials();
        assert_eq!(credentials.secret(), "file-secret");
        assert_eq!(credentials.api_key(), "file-key");
    }
}
