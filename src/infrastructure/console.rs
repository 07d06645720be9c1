//! # Console Transport Adapter
//!
//! Implements `ChatProvider` for an interactive terminal session: outbound
//! actions are rendered to stdout and inbound REPL lines are parsed into
//! `InboundEvent`s. This is the transport `main.rs` runs with; a production
//! deployment swaps in a messaging-network adapter behind the same trait.
//!
//! REPL input conventions:
//! - `/command args`   → command event
//! - `:tap <token>`    → button-tap (callback) event
//! - `:doc <handle>`   → document upload event
//! - `@id <line>`      → any of the above, impersonating another user
//! - anything else     → free-text event

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::traits::ChatProvider;
use crate::domain::types::{
    ChatRef, DocumentHandle, EventKind, EventRef, InboundEvent, Keyboard, MessageRef, SenderInfo,
    UserId,
};

#[derive(Default)]
pub struct ConsoleChat {
    counter: AtomicU64,
}

impl ConsoleChat {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ref(&self) -> MessageRef {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        MessageRef(format!("out-{id}"))
    }

    fn print_keyboard(keyboard: &Keyboard) {
        match keyboard {
            Keyboard::Reply(rows) => {
                for row in rows {
                    println!("  [{}]", row.join("] ["));
                }
            }
            Keyboard::Inline(rows) => {
                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|b| format!("{} → :tap {}", b.label, b.token))
                        .collect();
                    println!("  [{}]", cells.join("] ["));
                }
            }
        }
    }
}

#[async_trait]
impl ChatProvider for ConsoleChat {
    async fn send_text(
        &self,
        chat: &ChatRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, String> {
        let message = self.next_ref();
        println!("→ [{chat}] {text}");
        if let Some(keyboard) = keyboard {
            Self::print_keyboard(keyboard);
        }
        Ok(message)
    }

    async fn edit_text(
        &self,
        chat: &ChatRef,
        message: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), String> {
        println!("→ [{chat}] (edit {id}) {text}", id = message.0);
        if let Some(keyboard) = keyboard {
            Self::print_keyboard(keyboard);
        }
        Ok(())
    }

    async fn send_document(&self, chat: &ChatRef, handle: &DocumentHandle) -> Result<(), String> {
        println!("→ [{chat}] 📄 document {}", handle.0);
        Ok(())
    }

    async fn forward_original(
        &self,
        to: &ChatRef,
        from: &ChatRef,
        message: &MessageRef,
    ) -> Result<(), String> {
        println!("→ [{to}] (forwarded {id} from {from})", id = message.0);
        Ok(())
    }

    async fn acknowledge(&self, event: &EventRef) -> Result<(), String> {
        println!("· callback {} acknowledged", event.0);
        Ok(())
    }
}

/// Turn one REPL line into an inbound event. Returns `None` for blank input.
pub fn parse_line(line: &str, default_sender: &SenderInfo, seq: &mut u64) -> Option<InboundEvent> {
    let mut line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut sender = default_sender.clone();
    if let Some(rest) = line.strip_prefix('@') {
        let (id, remainder) = rest.split_once(char::is_whitespace)?;
        sender = SenderInfo {
            id: UserId::new(id),
            display_name: id.to_string(),
            username: None,
        };
        line = remainder.trim();
        if line.is_empty() {
            return None;
        }
    }
    let chat = ChatRef::direct(&sender.id);

    *seq += 1;
    let kind = if let Some(rest) = line.strip_prefix('/') {
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };
        EventKind::Command {
            name: name.to_string(),
            args: args.to_string(),
        }
    } else if let Some(token) = line.strip_prefix(":tap ") {
        EventKind::Callback {
            event: EventRef(format!("cb-{seq}")),
            message: MessageRef(format!("in-{seq}")),
            token: token.trim().to_string(),
        }
    } else if let Some(handle) = line.strip_prefix(":doc ") {
        EventKind::Document(DocumentHandle(handle.trim().to_string()))
    } else {
        EventKind::Text {
            body: line.to_string(),
            message: MessageRef(format!("in-{seq}")),
        }
    };

    Some(InboundEvent { sender, chat, kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_sender() -> SenderInfo {
        SenderInfo {
            id: UserId::new("console"),
            display_name: "Console".to_string(),
            username: None,
        }
    }

    #[test]
    fn parses_commands_text_taps_and_documents() {
        let mut seq = 0;
        let sender = default_sender();

        let event = parse_line("/addadmin 42", &sender, &mut seq).unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Command { ref name, ref args } if name == "addadmin" && args == "42"
        ));

        let event = parse_line(":tap sinhala_medium", &sender, &mut seq).unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Callback { ref token, .. } if token == "sinhala_medium"
        ));

        let event = parse_line(":doc file-123", &sender, &mut seq).unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Document(DocumentHandle(ref h)) if h == "file-123"
        ));

        let event = parse_line("hello there", &sender, &mut seq).unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Text { ref body, .. } if body == "hello there"
        ));

        assert!(parse_line("   ", &sender, &mut seq).is_none());
    }

    #[test]
    fn impersonation_prefix_switches_the_sender() {
        let mut seq = 0;
        let event = parse_line("@alice hello", &default_sender(), &mut seq).unwrap();
        assert_eq!(event.sender.id, UserId::new("alice"));
        assert_eq!(event.chat, ChatRef::direct(&UserId::new("alice")));

        assert!(parse_line("@alice", &default_sender(), &mut seq).is_none());
    }
}
