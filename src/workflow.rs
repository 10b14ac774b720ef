//! Orchestration of the full regression-config workflow.
//!
//! Mirrors the one-shot sequence the tool exists for: make sure the upstream
//! working copy is present, then run the documentation parser against the
//! configured XML file. Either step failing aborts the run with that step's
//! error; the parser is never invoked when the fetch fails.

use crate::config::{ConfigError, ToolConfig};
use crate::fetch::{fetch_repository, FetchError, FetchOutcome};
use crate::generate::{generate_config, GenerateError, ParserInvocation};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during a workflow run
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Config generation failed: {0}")]
    Generate(#[from] GenerateError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Summary of a completed workflow run
#[derive(Debug)]
pub struct WorkflowReport {
    pub fetch_outcome: FetchOutcome,
    pub module_name: String,
}

/// Fetch the repository, then generate the config for the configured module
pub async fn run(config: &ToolConfig) -> WorkflowResult<WorkflowReport> {
    config.validate()?;

    let fetch_outcome = fetch_repository(&config.repo_url, &config.destination_dir)?;
    info!(%fetch_outcome, "repository ready");

    let invocation = ParserInvocation::new(
        &config.java_bin,
        &config.parser_jar,
        &config.xml_file_path,
        &config.module_name,
    );
    generate_config(&invocation, config.parse_timeout()).await?;

    Ok(WorkflowReport {
        fetch_outcome,
        module_name: config.module_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_error_wraps_config_error() {
        let error = WorkflowError::from(ConfigError::Invalid("Module name cannot be empty".into()));
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("Module name"));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_any_work() {
        let config = ToolConfig::new().with_module_name("");
        let result = run(&config).await;
        assert!(matches!(result, Err(WorkflowError::Config(_))));
    }
}
