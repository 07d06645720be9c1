//! # Menu Navigation
//!
//! Renders the medium → subject → year menus and resolves terminal
//! selections against the repository. Callback events land here after the
//! dispatcher classifies them; every callback is acknowledged exactly once,
//! whether or not its token decoded.

use anyhow::Result;

use crate::application::catalog::{self, Medium, SUBJECT_COLUMNS, YEAR_COLUMNS};
use crate::application::repository::FileRepository;
use crate::application::token::{FileKey, NavPath};
use crate::domain::traits::ChatProvider;
use crate::domain::types::{Button, ChatRef, EventRef, Keyboard, MessageRef};
use crate::strings::messages;

/// The `Grade 11` reply-keyboard shortcut: show the medium menu.
pub async fn handle_grade_label(chat: &impl ChatProvider, chat_ref: &ChatRef) -> Result<()> {
    chat.send_text(chat_ref, messages::SELECT_MEDIUM, Some(&medium_keyboard()))
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

/// The `Contact Admin` reply-keyboard shortcut: prompt for a message.
pub async fn handle_contact_label(chat: &impl ChatProvider, chat_ref: &ChatRef) -> Result<()> {
    chat.send_text(chat_ref, messages::CONTACT_PROMPT, None)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}

/// Handle one button tap. The loading indicator is closed exactly once at
/// the end, on the success and the error path alike.
pub async fn handle_callback<C: ChatProvider>(
    repository: &FileRepository,
    chat: &C,
    chat_ref: &ChatRef,
    event: &EventRef,
    message: &MessageRef,
    token: &str,
) -> Result<()> {
    let outcome = render_selection(repository, chat, chat_ref, message, token).await;
    if let Err(err) = chat.acknowledge(event).await {
        tracing::warn!("Failed to acknowledge callback {token}: {err}");
    }
    outcome
}

async fn render_selection<C: ChatProvider>(
    repository: &FileRepository,
    chat: &C,
    chat_ref: &ChatRef,
    message: &MessageRef,
    token: &str,
) -> Result<()> {
    let path = match NavPath::decode(token) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!("Rejected navigation token: {err}");
            chat.send_text(chat_ref, messages::INVALID_SELECTION, None)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
    };

    match path {
        NavPath::Root => chat
            .edit_text(
                chat_ref,
                message,
                messages::SELECT_MEDIUM,
                Some(&medium_keyboard()),
            )
            .await
            .map_err(|e| anyhow::anyhow!(e)),
        NavPath::Medium(medium) => chat
            .edit_text(
                chat_ref,
                message,
                &messages::selected_medium(medium),
                Some(&subject_keyboard(medium)),
            )
            .await
            .map_err(|e| anyhow::anyhow!(e)),
        NavPath::Subject(medium, code) => {
            let title = catalog::subject(medium, code).map(|s| s.title).unwrap_or(code);
            chat.edit_text(
                chat_ref,
                message,
                &messages::selected_subject(medium, title),
                Some(&year_keyboard(medium, code)),
            )
            .await
            .map_err(|e| anyhow::anyhow!(e))
        }
        NavPath::Paper(medium, subject, year) => {
            let key = FileKey {
                medium,
                subject,
                year,
            };
            match repository.get(&key) {
                Ok(handle) => {
                    tracing::info!("Sending document for key {key}");
                    chat.send_document(chat_ref, &handle)
                        .await
                        .map_err(|e| anyhow::anyhow!(e))
                }
                Err(err) => {
                    tracing::info!("Lookup miss: {err}");
                    chat.send_text(chat_ref, messages::FILE_NOT_AVAILABLE, None)
                        .await
                        .map(|_| ())
                        .map_err(|e| anyhow::anyhow!(e))
                }
            }
        }
    }
}

fn medium_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        Medium::ALL
            .iter()
            .map(|m| Button {
                label: format!("{} Medium", m.title()),
                token: NavPath::Medium(*m).encode(),
            })
            .collect(),
    ])
}

fn subject_keyboard(medium: Medium) -> Keyboard {
    let buttons: Vec<Button> = catalog::subjects(medium)
        .iter()
        .map(|s| Button {
            label: s.title.to_string(),
            token: NavPath::Subject(medium, s.code).encode(),
        })
        .collect();
    let mut rows = catalog::button_rows(&buttons, SUBJECT_COLUMNS);
    rows.push(vec![Button {
        label: "« Main Menu".to_string(),
        token: NavPath::Root.encode(),
    }]);
    Keyboard::Inline(rows)
}

fn year_keyboard(medium: Medium, code: &'static str) -> Keyboard {
    let buttons: Vec<Button> = catalog::years()
        .iter()
        .map(|year| Button {
            label: year.to_string(),
            token: NavPath::Paper(medium, code, year.to_string()).encode(),
        })
        .collect();
    let mut rows = catalog::button_rows(&buttons, YEAR_COLUMNS);
    rows.push(vec![Button {
        label: "« Back to Subjects".to_string(),
        token: NavPath::Medium(medium).encode(),
    }]);
    Keyboard::Inline(rows)
}
