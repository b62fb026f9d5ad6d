//! SeaBot: the support assistant bridge.
//!
//! Each question is sent to the text-generation backend on its own, wrapped
//! in a fixed preamble and a JSON snapshot of the plan catalog. Whatever
//! happens on the backend side, the caller gets a reply to show: either the
//! generated answer or one of the fixed fallback strings below.

use crate::domain::catalog::Catalog;
use crate::domain::ports::AssistantBackendBox;
use crate::error::Result;
use tracing::{debug, warn};

pub const GREETING: &str = "Hello! I am SeaBot. How can I help you with your recharge today?";
pub const OFFLINE_FALLBACK: &str =
    "I'm sorry, my connection is currently offline (API Key missing).";
pub const CONNECTION_FALLBACK: &str =
    "I'm having trouble connecting to the server right now. Please try again later.";
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response at the moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// Conversation shown in the support widget. Starts with the greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Bot,
                text: GREETING.to_string(),
            }],
        }
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            text: text.into(),
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    BackendUnavailable,
    EmptyReply,
}

impl FallbackReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingCredential => OFFLINE_FALLBACK,
            Self::BackendUnavailable => CONNECTION_FALLBACK,
            Self::EmptyReply => EMPTY_REPLY_FALLBACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    Answer(String),
    Fallback(FallbackReason),
}

impl AssistantReply {
    pub fn text(&self) -> &str {
        match self {
            Self::Answer(text) => text,
            Self::Fallback(reason) => reason.message(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

pub struct SupportAssistant {
    backend: Option<AssistantBackendBox>,
    plans_json: String,
}

impl SupportAssistant {
    /// `backend` is `None` when no credential is configured.
    pub fn new(backend: Option<AssistantBackendBox>, catalog: &Catalog) -> Result<Self> {
        Ok(Self {
            backend,
            plans_json: serde_json::to_string(&catalog.plan_summaries())?,
        })
    }

    pub fn is_online(&self) -> bool {
        self.backend.is_some()
    }

    pub fn prompt_for(&self, query: &str) -> String {
        format!(
            "You are 'SeaBot', a helpful support assistant for SeaCharge, a recharge platform in Southeast Asia.\n\
             We sell:\n\
             - Mobile Top-ups (AIS, TrueMove, DTAC)\n\
             - Utility Bill Payments (MEA, MWA)\n\
             - Game Credits (RoV, PUBG, Genshin)\n\
             \n\
             Available plans data: {plans}\n\
             \n\
             User Query: \"{query}\"\n\
             \n\
             Your goal is to be helpful, concise, and recommend specific plans if the user asks for advice.\n\
             Keep the tone friendly and professional.",
            plans = self.plans_json,
        )
    }

    /// Sends one question to the backend. Never fails.
    pub async fn reply_to(&self, query: &str) -> AssistantReply {
        let Some(backend) = &self.backend else {
            return AssistantReply::Fallback(FallbackReason::MissingCredential);
        };

        match backend.generate(&self.prompt_for(query)).await {
            Ok(text) if text.trim().is_empty() => {
                debug!("assistant backend returned no text");
                AssistantReply::Fallback(FallbackReason::EmptyReply)
            }
            Ok(text) => AssistantReply::Answer(text),
            Err(e) => {
                warn!(error = %e, "assistant backend failed");
                AssistantReply::Fallback(FallbackReason::BackendUnavailable)
            }
        }
    }

    /// Records the user's message and the reply in `transcript`. Blank
    /// messages are ignored and yield `None`.
    pub async fn ask(&self, transcript: &mut Transcript, message: &str) -> Option<AssistantReply> {
        if message.trim().is_empty() {
            return None;
        }
        transcript.push(Role::User, message);
        let reply = self.reply_to(message).await;
        transcript.push(Role::Bot, reply.text());
        Some(reply)
    }
}
