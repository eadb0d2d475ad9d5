//! Testing utilities
//!
//! Provides a scripted in-memory client so session flows can be exercised
//! without a real CLI process.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::client::AgentClient;
use crate::error::{ClientError, Result};
use crate::message::Message;

/// Configuration for scripted failure injection
#[derive(Debug, Clone, Default)]
pub struct ScriptConfig {
    /// If set, fail the Nth connect attempt (1-based)
    pub fail_connect_attempt: Option<usize>,

    /// Fail every query submission
    pub fail_queries: bool,
}

/// One scripted step of a response stream
#[derive(Debug, Clone)]
enum ScriptStep {
    Message(Message),
    Fail(String),
}

#[derive(Default)]
struct ScriptState {
    scripts: VecDeque<VecDeque<ScriptStep>>,
    current: VecDeque<ScriptStep>,
    prompts: Vec<String>,
    events: Vec<String>,
    connect_attempts: usize,
    connected: bool,
}

/// Scripted in-memory agent client
///
/// Allows tests to:
/// - Queue one message sequence per expected query
/// - Track submitted prompts
/// - Record connect/disconnect ordering
/// - Inject connect and mid-stream failures
///
/// Clones share state, so a test can keep a handle for inspection after the
/// flow under test has consumed the client.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    state: Arc<Mutex<ScriptState>>,
    config: ScriptConfig,
}

impl ScriptedClient {
    /// Create a scripted client with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scripted client with custom failure injection
    pub fn with_config(config: ScriptConfig) -> Self {
        Self {
            state: Arc::default(),
            config,
        }
    }

    /// Queue the message sequence returned for the next query
    pub async fn enqueue_response(&self, messages: Vec<Message>) {
        let steps = messages.into_iter().map(ScriptStep::Message).collect();
        self.state.lock().await.scripts.push_back(steps);
    }

    /// Queue a sequence that fails mid-stream after the given messages
    pub async fn enqueue_failure(&self, messages: Vec<Message>, error: impl Into<String>) {
        let mut steps: VecDeque<ScriptStep> =
            messages.into_iter().map(ScriptStep::Message).collect();
        steps.push_back(ScriptStep::Fail(error.into()));
        self.state.lock().await.scripts.push_back(steps);
    }

    /// Prompts submitted via `query`, in order
    pub async fn prompts(&self) -> Vec<String> {
        self.state.lock().await.prompts.clone()
    }

    /// Connection lifecycle events ("connect" / "disconnect"), in order
    pub async fn events(&self) -> Vec<String> {
        self.state.lock().await.events.clone()
    }

    /// Number of successful connects
    pub async fn connect_count(&self) -> usize {
        self.count_events("connect").await
    }

    /// Number of disconnect calls
    pub async fn disconnect_count(&self) -> usize {
        self.count_events("disconnect").await
    }

    async fn count_events(&self, kind: &str) -> usize {
        self.state
            .lock()
            .await
            .events
            .iter()
            .filter(|e| e.as_str() == kind)
            .count()
    }
}

#[async_trait]
impl AgentClient for ScriptedClient {
    async fn connect(&mut self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.connect_attempts += 1;
        if self.config.fail_connect_attempt == Some(state.connect_attempts) {
            return Err(ClientError::Connection(
                "Scripted connect failure".to_string(),
            ));
        }
        if state.connected {
            return Err(ClientError::Connection("Already connected".to_string()));
        }
        state.connected = true;
        state.events.push("connect".to_string());
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.connected = false;
        state.current.clear();
        state.events.push("disconnect".to_string());
        Ok(())
    }

    async fn query(&mut self, prompt: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(ClientError::Connection("Not connected".to_string()));
        }
        if self.config.fail_queries {
            return Err(ClientError::Other("Scripted query failure".to_string()));
        }
        state.prompts.push(prompt.to_string());
        state.current = state.scripts.pop_front().unwrap_or_default();
        Ok(())
    }

    async fn next_message(&mut self) -> Result<Option<Message>> {
        let mut state = self.state.lock().await;
        if !state.connected {
            return Err(ClientError::Connection("Not connected".to_string()));
        }
        match state.current.pop_front() {
            Some(ScriptStep::Message(message)) => Ok(Some(message)),
            Some(ScriptStep::Fail(reason)) => Err(ClientError::Other(reason)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{AssistantMessage, ResultMessage};

    #[tokio::test]
    async fn test_scripted_enqueue_and_receive() {
        let mut client = ScriptedClient::new();
        client
            .enqueue_response(vec![
                Message::Assistant(AssistantMessage::text("hello")),
                Message::Result(ResultMessage::success()),
            ])
            .await;

        client.connect().await.unwrap();
        client.query("hi").await.unwrap();

        let first = client.next_message().await.unwrap();
        assert_eq!(first.unwrap().text_fragments(), vec!["hello"]);

        let second = client.next_message().await.unwrap();
        assert!(second.unwrap().is_result());

        // Script exhausted
        assert!(client.next_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scripted_prompt_tracking() {
        let mut client = ScriptedClient::new();
        let probe = client.clone();

        client.connect().await.unwrap();
        client.query("first").await.unwrap();
        client.query("second").await.unwrap();

        assert_eq!(probe.prompts().await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_scripted_requires_connection() {
        let mut client = ScriptedClient::new();
        assert!(client.query("hi").await.is_err());
        assert!(client.next_message().await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_connect_failure_injection() {
        let mut client = ScriptedClient::with_config(ScriptConfig {
            fail_connect_attempt: Some(2),
            ..Default::default()
        });

        assert!(client.connect().await.is_ok());
        assert!(client.disconnect().await.is_ok());
        assert!(client.connect().await.is_err());
        // The third attempt succeeds again
        assert!(client.connect().await.is_ok());
    }

    #[tokio::test]
    async fn test_scripted_event_ordering() {
        let mut client = ScriptedClient::new();
        let probe = client.clone();

        client.connect().await.unwrap();
        client.disconnect().await.unwrap();
        client.connect().await.unwrap();
        client.disconnect().await.unwrap();

        assert_eq!(
            probe.events().await,
            vec!["connect", "disconnect", "connect", "disconnect"]
        );
        assert_eq!(probe.connect_count().await, 2);
        assert_eq!(probe.disconnect_count().await, 2);
    }

    #[tokio::test]
    async fn test_scripted_mid_stream_failure() {
        let mut client = ScriptedClient::new();
        client
            .enqueue_failure(
                vec![Message::Assistant(AssistantMessage::text("partial"))],
                "stream torn down",
            )
            .await;

        client.connect().await.unwrap();
        client.query("hi").await.unwrap();

        assert!(client.next_message().await.unwrap().is_some());
        let err = client.next_message().await.unwrap_err();
        assert_eq!(err.to_string(), "stream torn down");
    }

    #[tokio::test]
    async fn test_scripted_disconnect_clears_pending_stream() {
        let mut client = ScriptedClient::new();
        client
            .enqueue_response(vec![Message::Assistant(AssistantMessage::text("stale"))])
            .await;

        client.connect().await.unwrap();
        client.query("hi").await.unwrap();
        client.disconnect().await.unwrap();
        client.connect().await.unwrap();

        // The reconnected session must not see the previous response
        assert!(client.next_message().await.unwrap().is_none());
    }
}
