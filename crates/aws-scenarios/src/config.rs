use std::fs;
use std::path::Path;

use scenario_operations::operations::StepFunctionsSettings;
use scenario_operations::providers::AwsSettings;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "aws-scenarios.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub aws: AwsSettings,
    pub step_functions: StepFunctionsSettings,
}

impl Config {
    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Command-line flags win over the file.
    pub fn override_aws(
        &mut self,
        region: Option<String>,
        endpoint_url: Option<String>,
        profile: Option<String>,
    ) {
        if region.is_some() {
            self.aws.region = region;
        }
        if endpoint_url.is_some() {
            self.aws.endpoint_url = endpoint_url;
        }
        if profile.is_some() {
            self.aws.profile = profile;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, content).expect("write config");
        (dir, path)
    }

    #[test]
    fn reads_both_sections() {
        let (_dir, path) = write_config(
            r#"
[aws]
region = "eu-west-1"
endpoint_url = "http://localhost:4566"

[step_functions]
activity_name = "my-activity"
keep_resources = true
"#,
        );

        let config = Config::load(Some(&path)).expect("valid config");

        assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(config.step_functions.activity_name, "my-activity");
        assert!(config.step_functions.keep_resources);
        assert_eq!(config.step_functions.role_name, "chat-sfn-role");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("[aws]\nregoin = \"us-east-1\"\n");

        let err = Config::load(Some(&path)).expect_err("typo in key");

        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn zero_max_polls_in_file_is_rejected() {
        let (_dir, path) = write_config("[step_functions]\nmax_polls = 0\n");

        let err = Config::load(Some(&path)).expect_err("zero polls");

        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");

        let err = Config::load(Some(&dir.path().join("absent.toml"))).expect_err("missing");

        assert!(matches!(err, CliError::ConfigRead { .. }));
    }

    #[test]
    fn flags_override_file_values() {
        let (_dir, path) = write_config("[aws]\nregion = \"eu-west-1\"\nprofile = \"dev\"\n");
        let mut config = Config::load(Some(&path)).expect("valid config");

        config.override_aws(Some("us-west-2".to_string()), None, None);

        assert_eq!(config.aws.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.aws.profile.as_deref(), Some("dev"));
        assert!(config.aws.endpoint_url.is_none());
    }
}
