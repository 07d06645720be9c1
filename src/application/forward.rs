//! # Forward Router
//!
//! Fans a non-admin message out to every registered admin: a header naming
//! the sender, then the original message. Delivery is attempted independently
//! per admin; one unreachable admin never blocks the rest, and the report of
//! who failed exists for logging only. Best-effort: no retry queue, nothing
//! persisted about undelivered forwards.

use std::sync::Arc;

use crate::application::registry::AdminRegistry;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatRef, DeliveryReport, MessageRef, SenderInfo};
use crate::strings::messages;

pub struct ForwardRouter {
    registry: Arc<AdminRegistry>,
}

impl ForwardRouter {
    pub fn new(registry: Arc<AdminRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `message` from `source` to every admin's direct chat.
    pub async fn broadcast<C>(
        &self,
        chat: &C,
        sender: &SenderInfo,
        source: &ChatRef,
        message: &MessageRef,
    ) -> DeliveryReport
    where
        C: ChatProvider + ?Sized,
    {
        let header = messages::forward_header(sender);
        let mut report = DeliveryReport::default();

        for admin in self.registry.list() {
            let admin_chat = ChatRef::direct(&admin);
            let attempt = match chat.send_text(&admin_chat, &header, None).await {
                Ok(_) => chat.forward_original(&admin_chat, source, message).await,
                Err(err) => Err(err),
            };
            match attempt {
                Ok(()) => report.delivered.push(admin),
                Err(err) => {
                    tracing::warn!("Failed to forward message to admin {admin}: {err}");
                    report.failed.push((admin, err));
                }
            }
        }

        report
    }
}
