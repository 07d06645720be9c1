//! # Help Command
//!
//! Handles `/help`: displays the command reference and usage walkthrough.

use anyhow::Result;

use crate::domain::traits::ChatProvider;
use crate::domain::types::ChatRef;
use crate::strings::help;

pub async fn handle_help(chat: &impl ChatProvider, chat_ref: &ChatRef) -> Result<()> {
    chat.send_text(chat_ref, help::MAIN, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
