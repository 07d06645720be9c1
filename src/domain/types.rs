//! # Domain Types
//!
//! Value types shared across layers: identities, chat/message references,
//! inbound events, keyboards, and the broadcast delivery report. All of them
//! are transport-agnostic; the concrete transport maps its own wire types onto
//! these at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable end-user identifier. Admin identities are `UserId`s too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a chat the transport can deliver into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatRef(pub String);

impl ChatRef {
    /// The direct chat with a user. Shares the user's identifier, matching the
    /// convention of transports where a private chat id equals the user id.
    pub fn direct(user: &UserId) -> Self {
        Self(user.0.clone())
    }
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a previously sent message within a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef(pub String);

/// Reference to an inbound callback event, used to close the client-side
/// loading indicator via `ChatProvider::acknowledge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRef(pub String);

/// Whatever the transport needs to resend a stored document. Never inspected
/// by the core, only carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentHandle(pub String);

/// Who sent an inbound event, as far as the transport knows.
#[derive(Debug, Clone)]
pub struct SenderInfo {
    pub id: UserId,
    pub display_name: String,
    pub username: Option<String>,
}

/// One inbound conversational event, already classified by the transport.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub sender: SenderInfo,
    pub chat: ChatRef,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub enum EventKind {
    /// A slash command, name without the leading `/`, args may be empty.
    Command { name: String, args: String },
    /// Free text. Carries its own message reference so it can be forwarded.
    Text { body: String, message: MessageRef },
    /// A button tap carrying an opaque navigation token.
    Callback {
        event: EventRef,
        message: MessageRef,
        token: String,
    },
    /// A document received from the sender.
    Document(DocumentHandle),
}

/// An inline button: visible label plus the navigation token sent back when
/// the user taps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

/// Button layout attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent reply keyboard; rows of plain labels echoed back as text.
    Reply(Vec<Vec<String>>),
    /// Inline keyboard; rows of token-carrying buttons.
    Inline(Vec<Vec<Button>>),
}

/// A document uploaded by an admin that is still waiting for its key.
/// Scoped per admin identity; never persisted.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub handle: DocumentHandle,
}

/// Outcome of a fan-out broadcast. Failures are recorded for logging only;
/// the sender's acknowledgment does not depend on them.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub delivered: Vec<UserId>,
    pub failed: Vec<(UserId, String)>,
}
