//! # Admin Management Commands
//!
//! Handles `/addadmin`, `/removeadmin`, and `/listadmins`. Permission gating
//! happens in the dispatcher before these run; persistence failures are
//! reported to the caller instead of being swallowed.

use anyhow::Result;

use crate::application::registry::AdminRegistry;
use crate::domain::errors::BotError;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatRef, UserId};
use crate::strings::messages;

pub async fn handle_add(
    registry: &AdminRegistry,
    chat: &impl ChatProvider,
    chat_ref: &ChatRef,
    args: &str,
) -> Result<()> {
    let id = args.trim();
    if id.is_empty() {
        chat.send_text(chat_ref, messages::ADD_ADMIN_USAGE, None)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let reply = match registry.add(UserId::new(id)) {
        Ok(()) => {
            tracing::info!("New admin added: {id}");
            messages::admin_added(id)
        }
        Err(err) => {
            tracing::error!("Failed to persist admin {id}: {err}");
            messages::persistence_failed(&err.to_string())
        }
    };
    chat.send_text(chat_ref, &reply, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

pub async fn handle_remove(
    registry: &AdminRegistry,
    chat: &impl ChatProvider,
    chat_ref: &ChatRef,
    args: &str,
) -> Result<()> {
    let id = args.trim();
    if id.is_empty() {
        chat.send_text(chat_ref, messages::REMOVE_ADMIN_USAGE, None)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let reply = match registry.remove(&UserId::new(id)) {
        Ok(true) => {
            tracing::info!("Admin removed: {id}");
            messages::admin_removed(id)
        }
        Ok(false) => messages::ADMIN_NOT_FOUND.to_string(),
        Err(BotError::CannotRemoveBootstrapAdmin) => {
            messages::CANNOT_REMOVE_MAIN_ADMIN.to_string()
        }
        Err(err) => {
            tracing::error!("Failed to persist admin removal {id}: {err}");
            messages::persistence_failed(&err.to_string())
        }
    };
    chat.send_text(chat_ref, &reply, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

pub async fn handle_list(
    registry: &AdminRegistry,
    chat: &impl ChatProvider,
    chat_ref: &ChatRef,
) -> Result<()> {
    let admins: Vec<String> = registry.list().into_iter().map(|id| id.0).collect();
    chat.send_text(chat_ref, &messages::admin_list(&admins), None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
