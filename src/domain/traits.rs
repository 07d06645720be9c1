//! # Domain Traits
//!
//! Abstract interface for the outbound side of a chat transport.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::types::{ChatRef, DocumentHandle, EventRef, Keyboard, MessageRef};

/// Abstract interface for a Chat Provider (e.g. Telegram, Matrix, Console).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a text message, optionally with a keyboard attached.
    async fn send_text(
        &self,
        chat: &ChatRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, String>;

    /// Replace the text (and keyboard) of a previously sent message.
    async fn edit_text(
        &self,
        chat: &ChatRef,
        message: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), String>;

    /// Resend a stored document into a chat.
    async fn send_document(&self, chat: &ChatRef, handle: &DocumentHandle) -> Result<(), String>;

    /// Forward an original message, preserving its attribution.
    async fn forward_original(
        &self,
        to: &ChatRef,
        from: &ChatRef,
        message: &MessageRef,
    ) -> Result<(), String>;

    /// Close the client-side loading indicator for a callback event.
    async fn acknowledge(&self, event: &EventRef) -> Result<(), String>;
}
