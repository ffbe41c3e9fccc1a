//! Conversation log shared by the shell, the manager and the agent

use crate::llm::provider::{Message, MessageRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Older session files spell this `agent`
    #[serde(alias = "agent")]
    Assistant,
    Developer,
}

impl From<Role> for MessageRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
            Role::Developer => MessageRole::Developer,
        }
    }
}

/// Tag carried by bulk payload entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Raw retrieved data, dropped once the turn that fetched it ends
    Data,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
}

impl ConversationEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            kind: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// User entry holding a retrieved payload
    pub fn data(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            kind: Some(EntryKind::Data),
        }
    }

    pub fn is_data(&self) -> bool {
        self.kind == Some(EntryKind::Data)
    }
}

/// Text form of an action payload; strings are used verbatim
pub fn render_payload(payload: &Value) -> String {
    match payload {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Role/content projection sent to the completion backend
pub fn to_messages(conversation: &[ConversationEntry]) -> Vec<Message> {
    conversation
        .iter()
        .map(|entry| Message {
            role: entry.role.into(),
            content: entry.content.clone(),
        })
        .collect()
}

/// Drop every data-tagged entry in place, returning how many were removed
pub fn prune_data_entries(conversation: &mut Vec<ConversationEntry>) -> usize {
    let before = conversation.len();
    conversation.retain(|entry| !entry.is_data());
    before - conversation.len()
}
