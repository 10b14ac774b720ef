//! Config generation via the external documentation parser.
//!
//! The parser is an opaque jar with a positional-argument contract:
//! `java -jar XMLParsing.jar <xml-file> <module>`. This module builds that
//! invocation, spawns it, and forwards the child's stdout and stderr
//! line-by-line to caller-supplied sinks. Both streams are drained
//! concurrently so neither pipe can fill up and stall the child.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Errors that can occur while running the parser
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The child process could not be started at all
    #[error("Failed to launch parser '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The parser ran but exited with a non-zero status
    #[error("Parser exited with {status}")]
    ParserFailed { status: ExitStatus },

    /// The configured time limit elapsed before the parser finished
    #[error("Parser timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Reading the child's output or writing to a sink failed
    #[error("IO error while draining parser output: {0}")]
    Io(#[from] std::io::Error),
}

pub type GenerateResult<T> = Result<T, GenerateError>;

/// A fully-specified parser invocation
#[derive(Debug, Clone)]
pub struct ParserInvocation {
    /// Java executable to launch
    pub java_bin: String,
    /// Path to the parser jar
    pub parser_jar: PathBuf,
    /// Documentation XML file to parse
    pub xml_file: PathBuf,
    /// Module whose documentation section is extracted
    pub module_name: String,
}

impl ParserInvocation {
    pub fn new(
        java_bin: impl Into<String>,
        parser_jar: impl Into<PathBuf>,
        xml_file: impl Into<PathBuf>,
        module_name: impl Into<String>,
    ) -> Self {
        Self {
            java_bin: java_bin.into(),
            parser_jar: parser_jar.into(),
            xml_file: xml_file.into(),
            module_name: module_name.into(),
        }
    }

    /// Arguments handed to the java executable. The parser's contract is
    /// positional: the XML file first, the module name second.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("-jar"),
            self.parser_jar.clone().into_os_string(),
            self.xml_file.clone().into_os_string(),
            OsString::from(&self.module_name),
        ]
    }

    /// Human-readable command line, for error messages
    pub fn command_line(&self) -> String {
        format!(
            "{} -jar {} {} {}",
            self.java_bin,
            self.parser_jar.display(),
            self.xml_file.display(),
            self.module_name
        )
    }
}

/// Spawn the parser and forward its output to the given sinks, returning the
/// child's exit status once it terminates.
///
/// Every line the child writes to stdout appears on `stdout_sink`, in order;
/// same for stderr on `stderr_sink`. When `time_limit` is set and elapses
/// first, the child is killed and [`GenerateError::Timeout`] is returned.
pub async fn run_parser<O, E>(
    invocation: &ParserInvocation,
    stdout_sink: &mut O,
    stderr_sink: &mut E,
    time_limit: Option<Duration>,
) -> GenerateResult<ExitStatus>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    debug!(command = %invocation.command_line(), "spawning parser");

    let mut child = Command::new(&invocation.java_bin)
        .args(invocation.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| GenerateError::Spawn {
            command: invocation.command_line(),
            source,
        })?;

    let child_stdout = child.stdout.take().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "child stdout was not captured")
    })?;
    let child_stderr = child.stderr.take().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "child stderr was not captured")
    })?;

    let drain_and_wait = async {
        tokio::try_join!(
            forward_lines(child_stdout, &mut *stdout_sink),
            forward_lines(child_stderr, &mut *stderr_sink),
        )?;
        child.wait().await
    };

    let status = if let Some(limit) = time_limit {
        let waited = timeout(limit, drain_and_wait).await;
        match waited {
            Ok(result) => result?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(GenerateError::Timeout { timeout: limit });
            }
        }
    } else {
        drain_and_wait.await?
    };

    debug!(%status, "parser finished");
    Ok(status)
}

/// Run the parser with the caller's real stdout/stderr as sinks and treat a
/// non-zero exit status as failure.
pub async fn generate_config(
    invocation: &ParserInvocation,
    time_limit: Option<Duration>,
) -> GenerateResult<()> {
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    let status = run_parser(invocation, &mut stdout, &mut stderr, time_limit).await?;

    if !status.success() {
        return Err(GenerateError::ParserFailed { status });
    }

    Ok(())
}

/// Copy lines from `reader` to `sink`, preserving order and content
async fn forward_lines<R, W>(reader: R, sink: &mut W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        sink.write_all(line.as_bytes()).await?;
        sink.write_all(b"\n").await?;
    }
    sink.flush().await?;
    Ok(())
}
