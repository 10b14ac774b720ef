//! Tool configuration.
//!
//! Every knob the tool exposes lives here; the CLI and an optional TOML file
//! both feed into [`ToolConfig`]. Defaults cover the usual regression
//! workflow, so a bare run needs no flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for the fetch and generate operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Upstream repository to clone
    pub repo_url: String,
    /// Directory the working copy lives in
    pub destination_dir: PathBuf,
    /// Documentation XML file handed to the parser
    pub xml_file_path: PathBuf,
    /// Checkstyle module whose documentation section is extracted
    pub module_name: String,
    /// Path to the external parser jar
    pub parser_jar: PathBuf,
    /// Java executable used to launch the parser
    pub java_bin: String,
    /// Upper bound on the parse, in seconds; `None` blocks until the parser
    /// exits on its own
    pub parse_timeout_secs: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/checkstyle/checkstyle.git".to_string(),
            destination_dir: PathBuf::from("checkstyle-repo"),
            xml_file_path: PathBuf::from("checkstyle-repo/src/xdocs/checks.xml"),
            module_name: "NewlineAtEndOfFile".to_string(),
            parser_jar: PathBuf::from("XMLParsing.jar"),
            java_bin: "java".to_string(),
            parse_timeout_secs: None,
        }
    }
}

impl ToolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file. Missing keys fall back to the
    /// defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn with_repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = repo_url.into();
        self
    }

    pub fn with_destination_dir(mut self, destination_dir: impl Into<PathBuf>) -> Self {
        self.destination_dir = destination_dir.into();
        self
    }

    pub fn with_xml_file_path(mut self, xml_file_path: impl Into<PathBuf>) -> Self {
        self.xml_file_path = xml_file_path.into();
        self
    }

    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn with_parser_jar(mut self, parser_jar: impl Into<PathBuf>) -> Self {
        self.parser_jar = parser_jar.into();
        self
    }

    pub fn with_java_bin(mut self, java_bin: impl Into<String>) -> Self {
        self.java_bin = java_bin.into();
        self
    }

    pub fn with_parse_timeout(mut self, secs: u64) -> Self {
        self.parse_timeout_secs = Some(secs);
        self
    }

    /// The parse timeout as a [`Duration`], if one is configured
    pub fn parse_timeout(&self) -> Option<Duration> {
        self.parse_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.repo_url.is_empty() {
            return Err(ConfigError::Invalid(
                "Repository URL cannot be empty".to_string(),
            ));
        }

        if self.destination_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Destination directory cannot be empty".to_string(),
            ));
        }

        if self.xml_file_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "XML file path cannot be empty".to_string(),
            ));
        }

        if self.module_name.is_empty() {
            return Err(ConfigError::Invalid(
                "Module name cannot be empty".to_string(),
            ));
        }

        if self.java_bin.is_empty() {
            return Err(ConfigError::Invalid(
                "Java executable cannot be empty".to_string(),
            ));
        }

        if self.parse_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "Parse timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(
            config.repo_url,
            "https://github.com/checkstyle/checkstyle.git"
        );
        assert_eq!(config.destination_dir, PathBuf::from("checkstyle-repo"));
        assert_eq!(config.module_name, "NewlineAtEndOfFile");
        assert_eq!(config.java_bin, "java");
        assert_eq!(config.parse_timeout_secs, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ToolConfig::new()
            .with_repo_url("https://example.com/repo.git")
            .with_destination_dir("work")
            .with_xml_file_path("work/docs.xml")
            .with_module_name("EmptyBlock")
            .with_parser_jar("parser.jar")
            .with_java_bin("/usr/bin/java")
            .with_parse_timeout(120);

        assert_eq!(config.repo_url, "https://example.com/repo.git");
        assert_eq!(config.destination_dir, PathBuf::from("work"));
        assert_eq!(config.module_name, "EmptyBlock");
        assert_eq!(config.parse_timeout(), Some(Duration::from_secs(120)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = ToolConfig::new().with_repo_url("");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ToolConfig::new().with_module_name("");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ToolConfig::new().with_java_bin("");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ToolConfig::new().with_parse_timeout(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "repo_url = \"https://example.com/checkstyle.git\"\nmodule_name = \"FinalLocalVariable\""
        )
        .unwrap();

        let config = ToolConfig::from_file(file.path()).unwrap();
        assert_eq!(config.repo_url, "https://example.com/checkstyle.git");
        assert_eq!(config.module_name, "FinalLocalVariable");
        // Unspecified keys keep their defaults
        assert_eq!(config.destination_dir, PathBuf::from("checkstyle-repo"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ToolConfig::from_file("/nonexistent/config.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "repo_url = [not toml").unwrap();

        let result = ToolConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
