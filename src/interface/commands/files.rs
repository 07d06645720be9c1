//! # Files Command
//!
//! Handles `/files`: lists every stored file key for admins, in upload order.

use anyhow::Result;

use crate::application::repository::FileRepository;
use crate::domain::traits::ChatProvider;
use crate::domain::types::ChatRef;
use crate::strings::messages;

pub async fn handle_files(
    repository: &FileRepository,
    chat: &impl ChatProvider,
    chat_ref: &ChatRef,
) -> Result<()> {
    let keys = repository.keys();
    let reply = if keys.is_empty() {
        messages::NO_FILES.to_string()
    } else {
        messages::file_list(&keys)
    };
    chat.send_text(chat_ref, &reply, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
