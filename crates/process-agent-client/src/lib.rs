//! Streaming client for the Claude Code CLI
//!
//! This crate is the backend boundary of the process-agent workspace: it
//! spawns the CLI in stream-json mode, frames user messages onto its stdin,
//! and decodes the line-delimited JSON it streams back. Everything above it
//! programs against the [`AgentClient`] trait, so tests substitute the
//! scripted in-memory client and never touch a real process.
//!
//! # Layers
//!
//! 1. **Options** ([`options`]): the immutable bundle translated to CLI flags
//! 2. **Messages** ([`message`]): the tagged union decoded from the stream
//! 3. **Client** ([`client`], [`subprocess`]): the four-operation boundary
//!    and its CLI-backed implementation
//!
//! # Usage Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use process_agent_client::{AgentClient, AgentOptions, CliAgentClient, CliConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = AgentOptions::new().with_model("haiku");
//!     let mut client = CliAgentClient::new(options, CliConfig::default());
//!
//!     client.connect().await?;
//!     client.query("What is 2+2?").await?;
//!
//!     let mut stream = client.receive_response();
//!     while let Some(message) = stream.try_next().await? {
//!         for fragment in message.text_fragments() {
//!             print!("{}", fragment);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod message;
pub mod options;
pub mod subprocess;
pub mod testing;

// Re-export commonly used types
pub use client::AgentClient;
pub use error::{ClientError, Result};
pub use message::{
    AssistantBody, AssistantMessage, ContentBlock, Message, ResultMessage, SystemMessage,
    UserMessage,
};
pub use options::{AgentDefinition, AgentOptions, PermissionMode, SettingSource};
pub use subprocess::{CliAgentClient, CliConfig};
pub use testing::{ScriptConfig, ScriptedClient};
