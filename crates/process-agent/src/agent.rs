//! Interactive terminal session
//!
//! A turn-based conversation loop: read a line, hand it to the backend,
//! stream the response text back out. The loop recognizes three commands
//! (`exit`/`quit` to end, `new` to clear context) and recovers from query
//! failures inline rather than ending the whole session. The loop core is
//! generic over its line input and output sink so tests drive it against
//! in-memory buffers and a scripted backend.

use futures::TryStreamExt;
use process_agent_client::{AgentClient, AgentOptions, CliAgentClient, CliConfig, Message};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::error::{AgentError, Result};
use crate::session::Session;

/// Banner printed when the interactive session starts
const BANNER: &str = "Process Agent\n\nType your questions or requests. Commands:\n  • 'exit' or 'quit' to end the session\n  • 'new' to start a new conversation\n";

/// Run the interactive terminal session against the real CLI
///
/// Blocks until the user ends the session with `exit`/`quit` (or end of
/// input), or a connection-level failure makes the session unusable.
pub async fn run_interactive_session(options: &AgentOptions) -> Result<()> {
    let client = CliAgentClient::new(options.clone(), CliConfig::default());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_session_loop(client, stdin, &mut stdout).await
}

/// Drive the conversation loop over an arbitrary backend and I/O pair
///
/// The backend session is opened on entry and released on every exit path;
/// the `new` command performs one extra release/acquire cycle in between.
pub async fn run_session_loop<C, R, W>(client: C, mut input: R, output: &mut W) -> Result<()>
where
    C: AgentClient,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(BANNER.as_bytes()).await?;
    output.flush().await?;

    let mut session = Session::open(client).await?;
    let outcome = converse(&mut session, &mut input, output).await;
    let closed = session.close().await;
    outcome?;
    closed
}

/// The input cycle: prompt, read, dispatch
async fn converse<C, R, W>(session: &mut Session<C>, input: &mut R, output: &mut W) -> Result<()>
where
    C: AgentClient,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut turn_count: u32 = 0;

    loop {
        output
            .write_all(format!("\nYou (Turn {}): ", turn_count + 1).as_bytes())
            .await?;
        output.flush().await?;

        let mut line = String::new();
        let eof = input.read_line(&mut line).await? == 0;
        let trimmed = line.trim();

        if eof || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            output.write_all(b"\nEnding session. Goodbye!\n").await?;
            output.flush().await?;
            return Ok(());
        }

        if trimmed.eq_ignore_ascii_case("new") {
            // No fallback exists if this fails, so it propagates
            session.reset().await?;
            turn_count = 0;
            output
                .write_all(b"\nStarted new conversation (previous context cleared)\n")
                .await?;
            output.flush().await?;
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        turn_count += 1;
        debug!(turn = turn_count, "Submitting query");

        output.write_all(b"\nAgent: ").await?;
        output.flush().await?;

        if let Err(e) = stream_response(session.client_mut(), trimmed, output).await {
            warn!(error = %e, turn = turn_count, "Query failed");
            output
                .write_all(format!("\n[error: {}]", e).as_bytes())
                .await?;
        }

        output.write_all(b"\n").await?;
        output.flush().await?;
    }
}

/// Submit one query and stream its response text to the output sink
async fn stream_response<C, W>(client: &mut C, prompt: &str, output: &mut W) -> Result<()>
where
    C: AgentClient,
    W: AsyncWrite + Unpin,
{
    client.query(prompt).await?;

    let mut stream = client.receive_response();
    while let Some(message) = stream.try_next().await? {
        match &message {
            Message::Result(result) if result.is_error => {
                let detail = result.result.as_deref().unwrap_or(result.subtype.as_str());
                return Err(AgentError::Backend(detail.to_string()));
            }
            Message::Result(result) => {
                debug!(
                    duration_ms = result.duration_ms,
                    num_turns = result.num_turns,
                    "Query complete"
                );
            }
            _ => {
                for fragment in message.text_fragments() {
                    output.write_all(fragment.as_bytes()).await?;
                    output.flush().await?;
                }
            }
        }
    }
    Ok(())
}
