//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;

use initdeck_control::ServiceController;
use initdeck_core::prelude::*;

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::session::PendingCommand;

/// Execute an action by spawning a background task
pub fn handle_action<C>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, controller: Arc<C>)
where
    C: ServiceController + Sync + 'static,
{
    match action {
        UpdateAction::ExecuteCommand(pending) => {
            tokio::spawn(async move {
                execute_command(pending, controller.as_ref(), msg_tx).await;
            });
        }
    }
}

/// Run one command and report its result over the message channel
pub async fn execute_command<C>(
    pending: PendingCommand,
    controller: &C,
    msg_tx: mpsc::Sender<Message>,
) where
    C: ServiceController + Sync,
{
    let result = controller
        .execute(&pending.service_name, pending.action)
        .await;

    let message = Message::CommandCompleted {
        result: Box::new(result),
        origin: pending.origin,
    };
    if msg_tx.send(message).await.is_err() {
        debug!("Dropping result of '{}': receiver closed", pending.label());
    }
}
