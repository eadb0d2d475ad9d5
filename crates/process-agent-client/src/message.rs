//! Message types for the CLI streaming protocol
//!
//! The CLI emits one JSON object per line with a "type" field at the top
//! level. Only assistant and result messages carry data callers act on;
//! everything else passes through untouched. Unknown message types and
//! content block types decode to catch-all variants so additions on the
//! CLI side never break this client.

use serde::Deserialize;

/// A message from the CLI response stream
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Assistant response carrying content blocks
    Assistant(AssistantMessage),

    /// User message echoed back by the CLI (tool results)
    User(UserMessage),

    /// System message from the CLI
    System(SystemMessage),

    /// Final message closing a response
    Result(ResultMessage),

    /// Any message type this client does not model
    #[serde(other)]
    Other,
}

/// An assistant message from the CLI stream
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssistantMessage {
    /// The inner API message
    pub message: AssistantBody,
}

/// Body of an assistant message
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AssistantBody {
    /// The content blocks in the message
    #[serde(default)]
    pub content: Vec<ContentBlock>,

    /// The model that produced the message
    #[serde(default)]
    pub model: Option<String>,
}

/// A user message echoed back by the CLI
///
/// These appear in the stream when tool results are fed back to the model.
/// The payload is kept raw; nothing here inspects it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserMessage {
    /// The inner API message, unexamined
    #[serde(default)]
    pub message: serde_json::Value,
}

/// A system message from the CLI
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SystemMessage {
    /// Subtype of the system message
    #[serde(default)]
    pub subtype: String,

    /// Raw data from the system message
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// A result message indicating query completion
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ResultMessage {
    /// Subtype of the result message
    #[serde(default)]
    pub subtype: String,

    /// Duration in milliseconds
    #[serde(default)]
    pub duration_ms: u64,

    /// Whether the result is an error
    #[serde(default)]
    pub is_error: bool,

    /// Number of turns in the conversation
    #[serde(default)]
    pub num_turns: u32,

    /// Session identifier
    #[serde(default)]
    pub session_id: String,

    /// Total cost in USD (if available)
    pub total_cost_usd: Option<f64>,

    /// Result data
    pub result: Option<String>,
}

/// A content block in a message
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content.
    Text {
        /// The text content.
        text: String,
    },

    /// Any other block type (tool use, tool results, thinking).
    #[serde(other)]
    Other,
}

impl Message {
    /// Collect the text fragments carried by this message, in order
    ///
    /// Only assistant text blocks carry response text; every other message
    /// and block type yields nothing.
    pub fn text_fragments(&self) -> Vec<&str> {
        match self {
            Self::Assistant(msg) => msg
                .message
                .content
                .iter()
                .filter_map(ContentBlock::as_text)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether this is the result message that closes a response stream
    pub fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

impl AssistantMessage {
    /// Create an assistant message holding a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message: AssistantBody {
                content: vec![ContentBlock::text(text)],
                model: None,
            },
        }
    }
}

impl ResultMessage {
    /// Create a success result
    pub fn success() -> Self {
        Self {
            subtype: "success".to_string(),
            ..Default::default()
        }
    }

    /// Create an error result carrying the error text
    pub fn error(result: impl Into<String>) -> Self {
        Self {
            subtype: "error_during_execution".to_string(),
            is_error: true,
            result: Some(result.into()),
            ..Default::default()
        }
    }
}

impl ContentBlock {
    /// Create a text content block
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Get the text if this is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Other => None,
        }
    }
}
