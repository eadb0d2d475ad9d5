//! One-shot query execution
//!
//! Opens a session, submits a single prompt, and collects the response
//! text into one string. Unlike the interactive loop this is fail-fast:
//! any query or stream failure aborts the call, and the session is
//! released on both the success and failure paths.

use futures::TryStreamExt;
use process_agent_client::{AgentClient, AgentOptions, CliAgentClient, CliConfig, Message};
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::session::Session;

/// Send a single prompt to the CLI backend and return the response text
///
/// Only text content contributes to the result; tool-use blocks and
/// lifecycle messages are skipped. Fragments are concatenated in arrival
/// order with nothing inserted between them.
pub async fn query_agent(prompt: &str, options: &AgentOptions) -> Result<String> {
    let client = CliAgentClient::new(options.clone(), CliConfig::default());
    collect_response(client, prompt).await
}

/// Run one query against an arbitrary backend and collect the text
pub async fn collect_response<C: AgentClient>(client: C, prompt: &str) -> Result<String> {
    let mut session = Session::open(client).await?;
    let outcome = drain_response(session.client_mut(), prompt).await;
    let closed = session.close().await;
    let text = outcome?;
    closed?;
    Ok(text)
}

/// Submit the prompt and accumulate text fragments until the response ends
async fn drain_response<C: AgentClient>(client: &mut C, prompt: &str) -> Result<String> {
    client.query(prompt).await?;

    let mut response_text = String::new();
    let mut stream = client.receive_response();
    while let Some(message) = stream.try_next().await? {
        match &message {
            Message::Result(result) if result.is_error => {
                let detail = result.result.as_deref().unwrap_or(result.subtype.as_str());
                return Err(AgentError::Backend(detail.to_string()));
            }
            Message::Result(_) => {}
            _ => {
                for fragment in message.text_fragments() {
                    response_text.push_str(fragment);
                }
            }
        }
    }

    debug!(chars = response_text.len(), "Collected response");
    Ok(response_text)
}
