//! # Dispatcher
//!
//! Routes one inbound event at a time to the appropriate handler (in
//! `interface/commands`). Holds no cross-event memory except the per-admin
//! pending-upload map; everything durable lives behind the registry and the
//! repository.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::forward::ForwardRouter;
use crate::application::registry::AdminRegistry;
use crate::application::repository::FileRepository;
use crate::domain::errors::BotError;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{
    DocumentHandle, EventKind, InboundEvent, MessageRef, PendingUpload, UserId,
};
use crate::interface::commands;
use crate::strings::messages;

const ADMIN_GATED: &[&str] = &["addadmin", "removeadmin", "listadmins", "upload", "files"];

pub struct Dispatcher {
    registry: Arc<AdminRegistry>,
    repository: Arc<FileRepository>,
    forwarder: ForwardRouter,
    /// Uploaded-but-unkeyed documents, one slot per admin identity so
    /// concurrent uploads from two admins can never cross-assign handles.
    pending: Mutex<HashMap<UserId, PendingUpload>>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AdminRegistry>, repository: Arc<FileRepository>) -> Self {
        let forwarder = ForwardRouter::new(registry.clone());
        Self {
            registry,
            repository,
            forwarder,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub async fn route<C>(&self, chat: &C, event: InboundEvent) -> Result<()>
    where
        C: ChatProvider,
    {
        match &event.kind {
            EventKind::Command { name, args } => {
                tracing::info!(
                    "Dispatching command '/{name}' from {sender}",
                    sender = event.sender.id
                );
                self.route_command(chat, &event, name, args).await
            }
            EventKind::Text { body, message } => {
                self.route_text(chat, &event, body, message).await
            }
            EventKind::Callback {
                event: event_ref,
                message,
                token,
            } => {
                tracing::info!(
                    "Callback token '{token}' from {sender}",
                    sender = event.sender.id
                );
                commands::menu::handle_callback(
                    &self.repository,
                    chat,
                    &event.chat,
                    event_ref,
                    message,
                    token,
                )
                .await
            }
            EventKind::Document(handle) => self.route_document(chat, &event, handle).await,
        }
    }

    /// Permission check as a result value, not an unwound error.
    fn authorize(&self, name: &str, sender: &UserId) -> Result<(), BotError> {
        if ADMIN_GATED.contains(&name) && !self.registry.is_admin(sender) {
            return Err(BotError::PermissionDenied);
        }
        Ok(())
    }

    async fn route_command<C>(
        &self,
        chat: &C,
        event: &InboundEvent,
        name: &str,
        args: &str,
    ) -> Result<()>
    where
        C: ChatProvider,
    {
        if let Err(denied) = self.authorize(name, &event.sender.id) {
            tracing::info!(
                "Rejected '/{name}' from {sender}: {denied}",
                sender = event.sender.id
            );
            chat.send_text(&event.chat, messages::admin_only(name), None)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }

        match name {
            "start" => commands::start::handle_start(chat, &event.chat).await,
            "help" => commands::help::handle_help(chat, &event.chat).await,
            "addadmin" => {
                commands::admin::handle_add(&self.registry, chat, &event.chat, args).await
            }
            "removeadmin" => {
                commands::admin::handle_remove(&self.registry, chat, &event.chat, args).await
            }
            "listadmins" => commands::admin::handle_list(&self.registry, chat, &event.chat).await,
            "upload" => commands::upload::handle_instructions(chat, &event.chat).await,
            "files" => commands::files::handle_files(&self.repository, chat, &event.chat).await,
            _ => chat
                .send_text(&event.chat, messages::UNKNOWN_COMMAND, None)
                .await
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!(e)),
        }
    }

    async fn route_text<C>(
        &self,
        chat: &C,
        event: &InboundEvent,
        body: &str,
        message: &MessageRef,
    ) -> Result<()>
    where
        C: ChatProvider,
    {
        // Fixed navigation shortcuts from the main reply keyboard.
        match body.trim() {
            "Grade 11" => return commands::menu::handle_grade_label(chat, &event.chat).await,
            "Contact Admin" => {
                return commands::menu::handle_contact_label(chat, &event.chat).await;
            }
            _ => {}
        }

        let sender = &event.sender;
        if self.registry.is_admin(&sender.id) {
            let pending_handle = {
                let pending = self.pending.lock().await;
                pending.get(&sender.id).map(|p| p.handle.clone())
            };
            if let Some(handle) = pending_handle {
                let committed = commands::upload::handle_key_commit(
                    &self.repository,
                    chat,
                    &event.chat,
                    &handle,
                    body,
                )
                .await?;
                if committed {
                    self.pending.lock().await.remove(&sender.id);
                }
            }
            return Ok(());
        }

        // Free text from a non-admin goes out to every registered admin.
        let report = self
            .forwarder
            .broadcast(chat, sender, &event.chat, message)
            .await;
        if !report.failed.is_empty() {
            tracing::warn!(
                "Forward from {sender} reached {ok} admins, {bad} failed",
                sender = sender.id,
                ok = report.delivered.len(),
                bad = report.failed.len()
            );
        }
        chat.send_text(&event.chat, messages::FORWARD_ACK, None)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!(e))
    }

    async fn route_document<C>(
        &self,
        chat: &C,
        event: &InboundEvent,
        handle: &DocumentHandle,
    ) -> Result<()>
    where
        C: ChatProvider,
    {
        if !self.registry.is_admin(&event.sender.id) {
            tracing::debug!("Ignoring document from non-admin {}", event.sender.id);
            return Ok(());
        }

        self.pending.lock().await.insert(
            event.sender.id.clone(),
            PendingUpload {
                handle: handle.clone(),
            },
        );
        commands::upload::handle_document_received(chat, &event.chat).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::Store;
    use crate::application::token::FileKey;
    use crate::domain::types::{ChatRef, EventRef, Keyboard, SenderInfo};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Action {
        Sent { chat: String, text: String },
        Edited { chat: String, text: String },
        Document { chat: String, handle: String },
        Forwarded { to: String },
        Acked { event: String },
    }

    /// Records every outbound action; deliveries into `unreachable` chats
    /// fail, everything else succeeds.
    #[derive(Default)]
    struct RecordingChat {
        actions: StdMutex<Vec<Action>>,
        unreachable: HashSet<String>,
        counter: AtomicU64,
    }

    impl RecordingChat {
        fn unreachable(chats: &[&str]) -> Self {
            Self {
                unreachable: chats.iter().map(|c| c.to_string()).collect(),
                ..Self::default()
            }
        }

        fn actions(&self) -> Vec<Action> {
            self.actions.lock().unwrap().clone()
        }

        fn check(&self, chat: &ChatRef) -> Result<(), String> {
            if self.unreachable.contains(&chat.0) {
                Err(format!("chat {chat} unreachable"))
            } else {
                Ok(())
            }
        }

        fn record(&self, action: Action) {
            self.actions.lock().unwrap().push(action);
        }
    }

    #[async_trait]
    impl ChatProvider for RecordingChat {
        async fn send_text(
            &self,
            chat: &ChatRef,
            text: &str,
            _keyboard: Option<&Keyboard>,
        ) -> Result<MessageRef, String> {
            self.check(chat)?;
            self.record(Action::Sent {
                chat: chat.0.clone(),
                text: text.to_string(),
            });
            let id = self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(MessageRef(format!("m{id}")))
        }

        async fn edit_text(
            &self,
            chat: &ChatRef,
            _message: &MessageRef,
            text: &str,
            _keyboard: Option<&Keyboard>,
        ) -> Result<(), String> {
            self.check(chat)?;
            self.record(Action::Edited {
                chat: chat.0.clone(),
                text: text.to_string(),
            });
            Ok(())
        }

        async fn send_document(
            &self,
            chat: &ChatRef,
            handle: &DocumentHandle,
        ) -> Result<(), String> {
            self.check(chat)?;
            self.record(Action::Document {
                chat: chat.0.clone(),
                handle: handle.0.clone(),
            });
            Ok(())
        }

        async fn forward_original(
            &self,
            to: &ChatRef,
            _from: &ChatRef,
            _message: &MessageRef,
        ) -> Result<(), String> {
            self.check(to)?;
            self.record(Action::Forwarded { to: to.0.clone() });
            Ok(())
        }

        async fn acknowledge(&self, event: &EventRef) -> Result<(), String> {
            self.record(Action::Acked {
                event: event.0.clone(),
            });
            Ok(())
        }
    }

    struct Fixture {
        dispatcher: Dispatcher,
        repository: Arc<FileRepository>,
        registry: Arc<AdminRegistry>,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let bootstrap = UserId::new("admin-a");
        let store = Store::open(dir.path().join("botData.json"), &bootstrap).unwrap();
        let registry = Arc::new(AdminRegistry::new(store.clone(), bootstrap));
        let repository = Arc::new(FileRepository::new(store));
        let dispatcher = Dispatcher::new(registry.clone(), repository.clone());
        Fixture {
            dispatcher,
            repository,
            registry,
            _dir: dir,
        }
    }

    fn sender(id: &str) -> SenderInfo {
        SenderInfo {
            id: UserId::new(id),
            display_name: id.to_string(),
            username: None,
        }
    }

    fn command(from: &str, name: &str, args: &str) -> InboundEvent {
        InboundEvent {
            sender: sender(from),
            chat: ChatRef::direct(&UserId::new(from)),
            kind: EventKind::Command {
                name: name.to_string(),
                args: args.to_string(),
            },
        }
    }

    fn text(from: &str, body: &str) -> InboundEvent {
        InboundEvent {
            sender: sender(from),
            chat: ChatRef::direct(&UserId::new(from)),
            kind: EventKind::Text {
                body: body.to_string(),
                message: MessageRef(format!("in-{from}")),
            },
        }
    }

    fn document(from: &str, handle: &str) -> InboundEvent {
        InboundEvent {
            sender: sender(from),
            chat: ChatRef::direct(&UserId::new(from)),
            kind: EventKind::Document(DocumentHandle(handle.to_string())),
        }
    }

    fn callback(from: &str, token: &str) -> InboundEvent {
        InboundEvent {
            sender: sender(from),
            chat: ChatRef::direct(&UserId::new(from)),
            kind: EventKind::Callback {
                event: EventRef(format!("cb-{token}")),
                message: MessageRef("menu-1".to_string()),
                token: token.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn upload_then_key_reply_commits_to_the_repository() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, document("admin-a", "doc-science"))
            .await
            .unwrap();
        fx.dispatcher
            .route(&chat, text("admin-a", "english_medium_science_2022"))
            .await
            .unwrap();

        let key = FileKey::parse("english_medium_science_2022").unwrap();
        assert_eq!(
            fx.repository.get(&key).unwrap(),
            DocumentHandle("doc-science".to_string())
        );
        let texts: Vec<Action> = chat.actions();
        assert!(texts.contains(&Action::Sent {
            chat: "admin-a".to_string(),
            text: messages::UPLOAD_SAVED.to_string(),
        }));
    }

    #[tokio::test]
    async fn invalid_key_reply_keeps_the_pending_upload() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, document("admin-a", "doc-1"))
            .await
            .unwrap();
        fx.dispatcher
            .route(&chat, text("admin-a", "not a key"))
            .await
            .unwrap();
        // second attempt still has the document to commit
        fx.dispatcher
            .route(&chat, text("admin-a", "sinhala_medium_maths_2023"))
            .await
            .unwrap();

        let key = FileKey::parse("sinhala_medium_maths_2023").unwrap();
        assert_eq!(fx.repository.get(&key).unwrap(), DocumentHandle("doc-1".to_string()));
    }

    #[tokio::test]
    async fn pending_uploads_are_scoped_per_admin() {
        let fx = fixture();
        fx.registry.add(UserId::new("admin-b")).unwrap();
        let chat = RecordingChat::default();

        // both admins upload inside the same window
        fx.dispatcher
            .route(&chat, document("admin-a", "doc-from-a"))
            .await
            .unwrap();
        fx.dispatcher
            .route(&chat, document("admin-b", "doc-from-b"))
            .await
            .unwrap();

        // B replies with a valid key before A does
        fx.dispatcher
            .route(&chat, text("admin-b", "sinhala_medium_history_2021"))
            .await
            .unwrap();
        fx.dispatcher
            .route(&chat, text("admin-a", "english_medium_maths_2020"))
            .await
            .unwrap();

        let key_b = FileKey::parse("sinhala_medium_history_2021").unwrap();
        let key_a = FileKey::parse("english_medium_maths_2020").unwrap();
        assert_eq!(
            fx.repository.get(&key_b).unwrap(),
            DocumentHandle("doc-from-b".to_string())
        );
        assert_eq!(
            fx.repository.get(&key_a).unwrap(),
            DocumentHandle("doc-from-a".to_string())
        );
    }

    #[tokio::test]
    async fn partial_broadcast_failure_still_acknowledges_once() {
        let fx = fixture();
        fx.registry.add(UserId::new("admin-b")).unwrap();
        let chat = RecordingChat::unreachable(&["admin-a"]);

        fx.dispatcher.route(&chat, text("student", "hello")).await.unwrap();

        let actions = chat.actions();
        // the reachable admin still got the forward
        assert!(actions.contains(&Action::Forwarded {
            to: "admin-b".to_string()
        }));
        // and the sender got exactly one acknowledgment
        let acks = actions
            .iter()
            .filter(|a| {
                **a == Action::Sent {
                    chat: "student".to_string(),
                    text: messages::FORWARD_ACK.to_string(),
                }
            })
            .count();
        assert_eq!(acks, 1);
    }

    #[tokio::test]
    async fn callbacks_are_acknowledged_exactly_once_even_on_bad_tokens() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, callback("student", "sinhala_medium_bogus_9999"))
            .await
            .unwrap();

        let acks = chat
            .actions()
            .iter()
            .filter(|a| matches!(a, Action::Acked { .. }))
            .count();
        assert_eq!(acks, 1);
    }

    #[tokio::test]
    async fn year_selection_sends_the_stored_document() {
        let fx = fixture();
        let chat = RecordingChat::default();
        let key = FileKey::parse("sinhala_medium_maths_2023").unwrap();
        fx.repository
            .put(&key, DocumentHandle("doc-maths".to_string()))
            .unwrap();

        fx.dispatcher
            .route(&chat, callback("student", "sinhala_medium_maths_2023"))
            .await
            .unwrap();

        let actions = chat.actions();
        assert!(actions.contains(&Action::Document {
            chat: "student".to_string(),
            handle: "doc-maths".to_string()
        }));
        assert!(actions.iter().any(|a| matches!(a, Action::Acked { .. })));
    }

    #[tokio::test]
    async fn year_selection_without_a_file_reports_not_available() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, callback("student", "english_medium_art_2015"))
            .await
            .unwrap();

        assert!(chat.actions().contains(&Action::Sent {
            chat: "student".to_string(),
            text: messages::FILE_NOT_AVAILABLE.to_string()
        }));
    }

    #[tokio::test]
    async fn menu_callbacks_edit_in_place() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, callback("student", "english_medium"))
            .await
            .unwrap();

        assert!(chat.actions().contains(&Action::Edited {
            chat: "student".to_string(),
            text: messages::selected_medium(crate::application::catalog::Medium::English),
        }));
    }

    #[tokio::test]
    async fn admin_commands_are_gated() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, command("student", "addadmin", "student"))
            .await
            .unwrap();

        assert!(!fx.registry.is_admin(&UserId::new("student")));
        assert!(chat.actions().contains(&Action::Sent {
            chat: "student".to_string(),
            text: messages::admin_only("addadmin").to_string()
        }));
    }

    #[tokio::test]
    async fn documents_from_non_admins_are_ignored() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, document("student", "doc-x"))
            .await
            .unwrap();
        // no prompt, no pending slot to commit against
        assert!(chat.actions().is_empty());
        fx.dispatcher
            .route(&chat, text("student", "sinhala_medium_maths_2023"))
            .await
            .unwrap();
        let key = FileKey::parse("sinhala_medium_maths_2023").unwrap();
        assert!(fx.repository.get(&key).is_err());
    }

    #[tokio::test]
    async fn grade_label_shows_the_medium_menu() {
        let fx = fixture();
        let chat = RecordingChat::default();

        fx.dispatcher
            .route(&chat, text("student", "Grade 11"))
            .await
            .unwrap();

        assert!(chat.actions().contains(&Action::Sent {
            chat: "student".to_string(),
            text: messages::SELECT_MEDIUM.to_string()
        }));
    }
}
