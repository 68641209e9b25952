//! The cooking assistant: one linear, append-only conversation per mount.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::{ChatReply, CookbookApi};
use crate::error::{ApiError, ViewError};

pub const GREETING: &str = "Hello! I'm your AI cooking assistant. I can help you with recipes, \
cooking techniques, nutrition advice, and meal planning. What would you like to know?";
pub const APOLOGY: &str = "Sorry, I'm having trouble responding right now. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Proof that a user turn was appended and a reply is owed.
#[derive(Debug)]
#[must_use = "a pending send must be completed"]
pub struct PendingSend {
    message: String,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug)]
pub struct ChatSession {
    session_id: String,
    transcript: Vec<Turn>,
    in_flight: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_session_id(format!("chat-session-{}", Uuid::new_v4()))
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            transcript: vec![Turn {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
            in_flight: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight
    }

    /// Appends the user turn right away. Fails on blank input or while an
    /// earlier send is still waiting for its reply.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingSend, ViewError> {
        if text.trim().is_empty() {
            return Err(ViewError::EmptyMessage);
        }
        if self.in_flight {
            return Err(ViewError::Busy);
        }
        self.in_flight = true;
        self.transcript.push(Turn {
            role: Role::User,
            content: text.to_string(),
        });
        Ok(PendingSend {
            message: text.to_string(),
        })
    }

    /// Appends exactly one assistant turn: the reply, or the apology.
    pub fn finish_send(
        &mut self,
        _pending: PendingSend,
        result: Result<ChatReply, ApiError>,
    ) -> &Turn {
        let content = match result {
            Ok(reply) => reply.response,
            Err(e) => {
                warn!(error = %e, session_id = %self.session_id, "chat request failed");
                APOLOGY.to_string()
            }
        };
        self.in_flight = false;
        self.transcript.push(Turn {
            role: Role::Assistant,
            content,
        });
        &self.transcript[self.transcript.len() - 1]
    }

    /// Sends one message and returns the assistant turn that was appended.
    #[instrument(skip(self, api, text), fields(session_id = %self.session_id))]
    pub async fn send(&mut self, api: &dyn CookbookApi, text: &str) -> Result<&Turn, ViewError> {
        let pending = self.begin_send(text)?;
        let result = api.send_chat_message(&self.session_id, pending.message()).await;
        info!(turns = self.transcript.len() + 1, "assistant replied");
        Ok(self.finish_send(pending, result))
    }
}
