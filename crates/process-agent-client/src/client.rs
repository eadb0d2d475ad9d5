//! Client abstraction over the agent backend
//!
//! The four required operations are the entire network boundary: everything
//! above this trait treats the backend as an opaque capability that accepts
//! prompts and streams back messages.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};

use crate::error::Result;
use crate::message::Message;

/// Connection to an agent backend
///
/// Implemented by [`crate::subprocess::CliAgentClient`] for the real CLI and
/// by [`crate::testing::ScriptedClient`] for tests.
#[async_trait]
pub trait AgentClient: Send {
    /// Establish the backend connection
    async fn connect(&mut self) -> Result<()>;

    /// Tear down the backend connection
    ///
    /// Disconnecting an already-disconnected client is a no-op.
    async fn disconnect(&mut self) -> Result<()>;

    /// Submit a prompt to the backend
    async fn query(&mut self, prompt: &str) -> Result<()>;

    /// Receive the next message, or `None` once the backend closes the stream
    async fn next_message(&mut self) -> Result<Option<Message>>;

    /// Stream the messages of the current response in arrival order
    ///
    /// The stream is finite: it ends after yielding the result message that
    /// closes the response, or earlier if the backend closes the connection.
    fn receive_response(&mut self) -> BoxStream<'_, Result<Message>>
    where
        Self: Sized,
    {
        stream::try_unfold((self, false), |(client, done)| async move {
            if done {
                return Ok(None);
            }
            match client.next_message().await? {
                Some(message) => {
                    let done = message.is_result();
                    Ok(Some((message, (client, done))))
                }
                None => Ok(None),
            }
        })
        .boxed()
    }
}
