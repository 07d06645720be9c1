//! # Upload Workflow
//!
//! Handles `/upload` instructions, the receipt of a document from an admin,
//! and the key-commit message that finally maps the pending document into
//! the repository.

use anyhow::Result;

use crate::application::catalog;
use crate::application::repository::FileRepository;
use crate::application::token::FileKey;
use crate::domain::errors::BotError;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatRef, DocumentHandle};
use crate::strings::messages;

pub async fn handle_instructions(chat: &impl ChatProvider, chat_ref: &ChatRef) -> Result<()> {
    let text = messages::upload_instructions(&catalog::subject_list_text());
    chat.send_text(chat_ref, &text, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

/// A document arrived from an admin; the dispatcher has already parked it in
/// that admin's pending slot. Prompt for the key.
pub async fn handle_document_received(chat: &impl ChatProvider, chat_ref: &ChatRef) -> Result<()> {
    chat.send_text(chat_ref, messages::UPLOAD_RECEIVED, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

/// Try to commit an admin's pending document under the key given in `text`.
/// Returns `true` when the commit succeeded and the pending slot should be
/// cleared; on a format error or a persistence failure the caller keeps the
/// pending document for another attempt.
pub async fn handle_key_commit(
    repository: &FileRepository,
    chat: &impl ChatProvider,
    chat_ref: &ChatRef,
    pending: &DocumentHandle,
    text: &str,
) -> Result<bool> {
    let key = match FileKey::parse(text) {
        Ok(key) => key,
        Err(BotError::InvalidKeyFormat(_)) => {
            chat.send_text(chat_ref, messages::INVALID_KEY_FORMAT, None)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    match repository.put(&key, pending.clone()) {
        Ok(()) => {
            tracing::info!("Stored document for key {key}");
            chat.send_text(chat_ref, messages::UPLOAD_SAVED, None)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            Ok(true)
        }
        Err(err) => {
            tracing::error!("Failed to persist document for key {key}: {err}");
            chat.send_text(chat_ref, &messages::persistence_failed(&err.to_string()), None)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            Ok(false)
        }
    }
}
