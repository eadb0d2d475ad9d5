//! Scoped backend session
//!
//! Wraps a client connection so both flows share one lifecycle: connect on
//! open, disconnect exactly once on close, full teardown before reconnect on
//! reset. The subprocess transport additionally kills its child on drop, so
//! an unwound scope cannot leak a connection.

use process_agent_client::AgentClient;
use tracing::debug;

use crate::error::Result;

/// One connected lifetime of the backend client
pub struct Session<C: AgentClient> {
    client: C,
    connected: bool,
}

impl<C: AgentClient> Session<C> {
    /// Connect the client and enter the session scope
    pub async fn open(mut client: C) -> Result<Self> {
        client.connect().await?;
        debug!("Session opened");
        Ok(Self {
            client,
            connected: true,
        })
    }

    /// Tear down the connection and establish a fresh one
    ///
    /// The old connection is fully closed before the new one opens, so the
    /// backend never sees two at once. A failure on either side leaves the
    /// session disconnected and is fatal to the caller.
    pub async fn reset(&mut self) -> Result<()> {
        self.client.disconnect().await?;
        self.connected = false;
        self.client.connect().await?;
        self.connected = true;
        debug!("Session reset");
        Ok(())
    }

    /// Leave the session scope, releasing the connection
    pub async fn close(mut self) -> Result<()> {
        if self.connected {
            self.client.disconnect().await?;
            debug!("Session closed");
        }
        Ok(())
    }

    /// Access the underlying client
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use process_agent_client::testing::{ScriptConfig, ScriptedClient};

    #[tokio::test]
    async fn test_open_and_close() {
        let client = ScriptedClient::new();
        let probe = client.clone();

        let session = Session::open(client).await.unwrap();
        session.close().await.unwrap();

        assert_eq!(probe.events().await, vec!["connect", "disconnect"]);
    }

    #[tokio::test]
    async fn test_reset_closes_before_reconnecting() {
        let client = ScriptedClient::new();
        let probe = client.clone();

        let mut session = Session::open(client).await.unwrap();
        session.reset().await.unwrap();
        session.close().await.unwrap();

        assert_eq!(
            probe.events().await,
            vec!["connect", "disconnect", "connect", "disconnect"]
        );
    }

    #[tokio::test]
    async fn test_failed_reset_leaves_session_disconnected() {
        let client = ScriptedClient::with_config(ScriptConfig {
            fail_connect_attempt: Some(2),
            ..Default::default()
        });
        let probe = client.clone();

        let mut session = Session::open(client).await.unwrap();
        assert!(session.reset().await.is_err());

        // Close after a failed reset must not disconnect a second time
        session.close().await.unwrap();
        assert_eq!(probe.disconnect_count().await, 1);
    }
}
