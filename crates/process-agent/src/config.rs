//! Agent configuration
//!
//! The option bundle both entry points hand to the backend: personality
//! prompt, tool allow-list, sub-agents, model, and working directory.
//! Pure construction; built once at startup and passed by reference.

use std::collections::BTreeMap;

use process_agent_client::{AgentDefinition, AgentOptions, PermissionMode, SettingSource};

/// System prompt for the agent
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. You can help with general questions and tasks. And you love cats. So sprinkle some cat facts in your responses. Create new files in the working directory.";

/// Tools the agent may use without prompting
pub const ALLOWED_TOOLS: [&str; 7] = ["Read", "Grep", "Glob", "Bash", "Write", "Edit", "Skill"];

/// Directory the agent works in
pub const WORKING_DIR: &str = "working-dir";

/// Named sub-agents available for delegation
pub fn subagents() -> BTreeMap<String, AgentDefinition> {
    BTreeMap::from([
        (
            "explainer".to_string(),
            AgentDefinition::new(
                "Use for explaining any concepts to beginners.",
                "You are a patient, detailed explainer that uses simple language and analogies to explain concepts to beginners.",
            )
            .with_tools(vec!["Read".into(), "Edit".into()])
            .with_model("haiku"),
        ),
        (
            "reviewer".to_string(),
            AgentDefinition::new(
                "Use for reviewing my responses.",
                "You are a friendly and helpful assistant that reviews my responses and provides feedback.",
            )
            .with_model("haiku"),
        ),
    ])
}

/// Build the option bundle shared by both entry points
pub fn agent_options() -> AgentOptions {
    AgentOptions::new()
        .with_system_prompt(SYSTEM_PROMPT)
        .with_allowed_tools(ALLOWED_TOOLS.iter().map(|t| t.to_string()).collect())
        .with_permission_mode(PermissionMode::Default)
        .with_model("haiku")
        .with_cwd(WORKING_DIR)
        .with_setting_sources(vec![SettingSource::Local])
        .with_agents(subagents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_options() {
        let options = agent_options();
        assert_eq!(options.system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(options.allowed_tools.len(), 7);
        assert!(options.allowed_tools.contains(&"Skill".to_string()));
        assert_eq!(options.permission_mode, PermissionMode::Default);
        assert_eq!(options.model.as_deref(), Some("haiku"));
        assert_eq!(
            options.cwd.as_deref(),
            Some(std::path::Path::new(WORKING_DIR))
        );
        assert_eq!(options.setting_sources, vec![SettingSource::Local]);
    }

    #[test]
    fn test_subagents() {
        let agents = subagents();
        assert_eq!(agents.len(), 2);

        let explainer = &agents["explainer"];
        assert_eq!(
            explainer.tools.as_deref(),
            Some(["Read".to_string(), "Edit".to_string()].as_slice())
        );
        assert_eq!(explainer.model.as_deref(), Some("haiku"));

        // The reviewer inherits the full tool set
        let reviewer = &agents["reviewer"];
        assert!(reviewer.tools.is_none());
        assert_eq!(reviewer.model.as_deref(), Some("haiku"));
    }
}
