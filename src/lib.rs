//! Regression-config generation harness for Checkstyle diff testing.
//!
//! Two independent operations, composable into one workflow: fetching a
//! working copy of the upstream Checkstyle repository, and running the
//! external documentation parser against a documentation XML file for a
//! named module.

pub mod config;
pub mod fetch;
pub mod generate;
pub mod workflow;

pub use config::{ConfigError, ConfigResult, ToolConfig};
pub use fetch::{fetch_repository, FetchError, FetchOutcome, FetchResult};
pub use generate::{
    generate_config, run_parser, GenerateError, GenerateResult, ParserInvocation,
};
pub use workflow::{WorkflowError, WorkflowReport, WorkflowResult};
