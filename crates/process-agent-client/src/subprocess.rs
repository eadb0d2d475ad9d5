//! CLI subprocess client
//!
//! Spawns the Claude Code CLI in stream-json mode and speaks its
//! line-delimited JSON protocol over the child's stdio. The child inherits
//! the parent environment so credentials loaded at startup reach it, and it
//! is killed on drop so an abandoned client cannot leak a process.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::client::AgentClient;
use crate::error::{ClientError, Result};
use crate::message::Message;
use crate::options::AgentOptions;

/// Configuration for spawning the CLI process
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Path to the CLI executable
    pub cli_path: String,

    /// Extra arguments appended after the generated ones
    pub extra_args: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            cli_path: "claude".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Create a configuration for a specific executable
    pub fn new(cli_path: impl Into<String>) -> Self {
        Self {
            cli_path: cli_path.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append an extra CLI argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}

struct CliProcess {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

/// Agent client backed by a spawned CLI process
pub struct CliAgentClient {
    options: AgentOptions,
    config: CliConfig,
    process: Option<CliProcess>,
}

impl CliAgentClient {
    /// Create a disconnected client for the given options
    pub fn new(options: AgentOptions, config: CliConfig) -> Self {
        Self {
            options,
            config,
            process: None,
        }
    }

    /// Whether a CLI process is currently attached
    pub fn is_connected(&self) -> bool {
        self.process.is_some()
    }

    /// Translate the option bundle into CLI flags
    fn build_args(&self) -> Result<Vec<String>> {
        let mut args = vec![
            "--input-format".to_string(),
            "stream-json".to_string(),
            "--output-format".to_string(),
            "stream-json".to_string(),
            "--verbose".to_string(),
        ];

        if let Some(prompt) = &self.options.system_prompt {
            args.push("--system-prompt".to_string());
            args.push(prompt.clone());
        }
        if !self.options.allowed_tools.is_empty() {
            args.push("--allowedTools".to_string());
            args.push(self.options.allowed_tools.join(","));
        }
        args.push("--permission-mode".to_string());
        args.push(self.options.permission_mode.as_str().to_string());
        if let Some(model) = &self.options.model {
            args.push("--model".to_string());
            args.push(model.clone());
        }
        if !self.options.setting_sources.is_empty() {
            let sources: Vec<&str> = self
                .options
                .setting_sources
                .iter()
                .map(|s| s.as_str())
                .collect();
            args.push("--setting-sources".to_string());
            args.push(sources.join(","));
        }
        if !self.options.agents.is_empty() {
            args.push("--agents".to_string());
            args.push(serde_json::to_string(&self.options.agents)?);
        }

        args.extend(self.config.extra_args.iter().cloned());
        Ok(args)
    }
}

#[async_trait]
impl AgentClient for CliAgentClient {
    async fn connect(&mut self) -> Result<()> {
        if self.process.is_some() {
            return Err(ClientError::Connection("Already connected".to_string()));
        }

        let args = self.build_args()?;
        let mut cmd = Command::new(&self.config.cli_path);
        cmd.args(&args);
        if let Some(cwd) = &self.options.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| ClientError::Process(format!("Failed to spawn CLI: {}", e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClientError::Process("Failed to get stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ClientError::Process("Failed to get stdout".to_string()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_stderr(stderr));
        }

        debug!(cli_path = %self.config.cli_path, "Spawned CLI process");

        self.process = Some(CliProcess {
            child,
            stdin: BufWriter::new(stdin),
            stdout: BufReader::new(stdout),
        });
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        let Some(mut process) = self.process.take() else {
            return Ok(());
        };

        // Closing stdin asks the CLI to wind down; kill covers the rest
        process.stdin.shutdown().await.ok();
        if process.child.try_wait()?.is_none() {
            process
                .child
                .kill()
                .await
                .map_err(|e| ClientError::Process(format!("Failed to kill process: {}", e)))?;
        }

        debug!("CLI process stopped");
        Ok(())
    }

    async fn query(&mut self, prompt: &str) -> Result<()> {
        let process = self
            .process
            .as_mut()
            .ok_or_else(|| ClientError::Connection("Not connected".to_string()))?;

        let message = json!({
            "type": "user",
            "message": {
                "role": "user",
                "content": prompt,
            },
        });
        let json = serde_json::to_string(&message)?;

        // Write message followed by newline
        process.stdin.write_all(json.as_bytes()).await?;
        process.stdin.write_all(b"\n").await?;
        process.stdin.flush().await?;

        debug!(bytes = json.len(), "Sent user message");
        Ok(())
    }

    async fn next_message(&mut self) -> Result<Option<Message>> {
        let process = self
            .process
            .as_mut()
            .ok_or_else(|| ClientError::Connection("Not connected".to_string()))?;

        loop {
            let mut line = String::new();
            match process.stdout.read_line(&mut line).await? {
                0 => return Ok(None), // EOF
                _ => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Ok(Some(serde_json::from_str(trimmed)?));
                }
            }
        }
    }
}

/// Drain the child's stderr into the log stream
async fn forward_stderr(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => debug!("CLI stderr: {}", line),
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read CLI stderr: {}", e);
                break;
            }
        }
    }
}
