//! Agent option types
//!
//! The immutable option bundle handed to the CLI at spawn time: system
//! prompt, tool allow-list, permission mode, model, working directory,
//! setting sources, and named sub-agent definitions. Options are built once
//! at startup and cloned into each client; nothing here performs I/O.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Permission mode for tool execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionMode {
    /// Prompt on first use of each tool
    #[default]
    Default,

    /// Automatically accept file edits
    AcceptEdits,

    /// Skip all permission prompts
    BypassPermissions,
}

impl PermissionMode {
    /// The flag value the CLI understands
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::AcceptEdits => "acceptEdits",
            Self::BypassPermissions => "bypassPermissions",
        }
    }
}

/// Filesystem setting source the CLI may load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    /// User-level settings
    User,

    /// Shared project settings
    Project,

    /// Local project settings
    Local,
}

impl SettingSource {
    /// The flag value the CLI understands
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Local => "local",
        }
    }
}

/// A named sub-agent the backend may delegate to
///
/// Serializes to the JSON shape the CLI's `--agents` flag expects; optional
/// fields are omitted so a sub-agent without a tool subset inherits the
/// full set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentDefinition {
    /// When the backend should pick this sub-agent
    pub description: String,

    /// System prompt for the sub-agent
    pub prompt: String,

    /// Tool subset available to the sub-agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,

    /// Model override for the sub-agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AgentDefinition {
    /// Create a definition with the required fields
    pub fn new(description: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            prompt: prompt.into(),
            tools: None,
            model: None,
        }
    }

    /// Restrict the sub-agent to a tool subset
    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the model for the sub-agent
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Immutable option bundle shared by every session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentOptions {
    /// System prompt override; `None` keeps the CLI default
    pub system_prompt: Option<String>,

    /// Tools the agent may use without prompting
    pub allowed_tools: Vec<String>,

    /// Permission mode for tool execution
    pub permission_mode: PermissionMode,

    /// Model identifier; `None` keeps the CLI default
    pub model: Option<String>,

    /// Working directory for the agent process
    pub cwd: Option<PathBuf>,

    /// Filesystem setting sources the CLI may read
    pub setting_sources: Vec<SettingSource>,

    /// Named sub-agents available for delegation
    pub agents: BTreeMap<String, AgentDefinition>,
}

impl AgentOptions {
    /// Create an empty option bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the tool allow-list
    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.allowed_tools = tools;
        self
    }

    /// Set the permission mode
    pub fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the setting sources
    pub fn with_setting_sources(mut self, sources: Vec<SettingSource>) -> Self {
        self.setting_sources = sources;
        self
    }

    /// Set the full sub-agent map
    pub fn with_agents(mut self, agents: BTreeMap<String, AgentDefinition>) -> Self {
        self.agents = agents;
        self
    }

    /// Add a single sub-agent
    pub fn with_agent(mut self, name: impl Into<String>, agent: AgentDefinition) -> Self {
        self.agents.insert(name.into(), agent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_options() {
        let options = AgentOptions::default();
        assert!(options.system_prompt.is_none());
        assert!(options.allowed_tools.is_empty());
        assert_eq!(options.permission_mode, PermissionMode::Default);
        assert!(options.model.is_none());
        assert!(options.cwd.is_none());
        assert!(options.agents.is_empty());
    }

    #[test]
    fn test_options_builder() {
        let options = AgentOptions::new()
            .with_system_prompt("You are concise")
            .with_allowed_tools(vec!["Read".into(), "Bash".into()])
            .with_permission_mode(PermissionMode::BypassPermissions)
            .with_model("haiku")
            .with_cwd("scratch")
            .with_setting_sources(vec![SettingSource::Local])
            .with_agent("helper", AgentDefinition::new("Helps out.", "Be helpful."));

        assert_eq!(options.system_prompt.as_deref(), Some("You are concise"));
        assert_eq!(options.allowed_tools, vec!["Read", "Bash"]);
        assert_eq!(
            options.permission_mode,
            PermissionMode::BypassPermissions
        );
        assert_eq!(options.model.as_deref(), Some("haiku"));
        assert_eq!(options.cwd.as_deref(), Some(std::path::Path::new("scratch")));
        assert_eq!(options.setting_sources, vec![SettingSource::Local]);
        assert!(options.agents.contains_key("helper"));
    }

    #[rstest]
    #[case(PermissionMode::Default, "default")]
    #[case(PermissionMode::AcceptEdits, "acceptEdits")]
    #[case(PermissionMode::BypassPermissions, "bypassPermissions")]
    fn test_permission_mode_flag_values(#[case] mode: PermissionMode, #[case] flag: &str) {
        assert_eq!(mode.as_str(), flag);
    }

    #[test]
    fn test_agent_definition_serialization() {
        let agent = AgentDefinition::new("Reviews things.", "You review.")
            .with_tools(vec!["Read".into()])
            .with_model("haiku");

        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["description"], "Reviews things.");
        assert_eq!(json["tools"][0], "Read");
        assert_eq!(json["model"], "haiku");
    }

    #[test]
    fn test_agent_definition_omits_unset_fields() {
        let agent = AgentDefinition::new("Reviews things.", "You review.");

        let json = serde_json::to_value(&agent).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("model").is_none());
    }
}
