//! Process Agent
//!
//! A small orchestration layer over the Claude Code CLI: a fixed agent
//! configuration, an interactive terminal session, and a one-shot query
//! helper. The conversation flows live here; the wire protocol and
//! process management live in [`process_agent_client`].
//!
//! # Layers
//!
//! - [`config`]: the agent's fixed configuration bundle
//! - [`session`]: connection lifecycle around a backend client
//! - [`agent`]: the interactive terminal loop
//! - [`query`]: single-prompt execution
//!
//! # Usage
//!
//! ```ignore
//! use process_agent::{agent_options, query_agent};
//!
//! let response = query_agent("What is a process?", &agent_options()).await?;
//! println!("{response}");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod config;
pub mod error;
pub mod query;
pub mod session;

pub use agent::{run_interactive_session, run_session_loop};
pub use config::{agent_options, subagents, ALLOWED_TOOLS, SYSTEM_PROMPT, WORKING_DIR};
pub use error::{AgentError, Result};
pub use query::{collect_response, query_agent};
pub use session::Session;

pub use process_agent_client::{AgentDefinition, AgentOptions, PermissionMode, SettingSource};
