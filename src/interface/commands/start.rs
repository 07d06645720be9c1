//! # Start Command
//!
//! Handles `/start`: greets the user and shows the main reply keyboard.

use anyhow::Result;

use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatRef, Keyboard};
use crate::strings::messages;

pub async fn handle_start(chat: &impl ChatProvider, chat_ref: &ChatRef) -> Result<()> {
    let keyboard = Keyboard::Reply(vec![
        vec!["Grade 11".to_string()],
        vec!["Contact Admin".to_string()],
    ]);
    chat.send_text(chat_ref, messages::WELCOME, Some(&keyboard))
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
