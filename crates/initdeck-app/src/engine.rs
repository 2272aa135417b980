//! Engine - owner of the application state and the message channel
//!
//! Every state change goes through [`Engine::process_message`], which runs the
//! TEA update and hands resulting actions to background tasks. Background
//! tasks report back over the message channel, so draining the channel is the
//! single serialized update point.

use std::sync::Arc;

use tokio::sync::mpsc;

use initdeck_control::ServiceController;
use initdeck_core::prelude::*;

use crate::actions;
use crate::config::Settings;
use crate::handler;
use crate::message::Message;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
pub const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for initdeck.
///
/// Generic over the controller so tests can drive it with a scripted fake.
pub struct Engine<C> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, command tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    controller: Arc<C>,
}

impl<C> Engine<C>
where
    C: ServiceController + Sync + 'static,
{
    /// Create the engine and spawn the signal handler.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(settings: Settings, controller: C) -> Self {
        let state = AppState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);

        signals::spawn_signal_handler(msg_tx.clone());

        Self {
            state,
            msg_tx,
            msg_rx,
            controller: Arc::new(controller),
        }
    }

    /// Initial catalog load (and status query of the first service when
    /// `status_on_select` is on)
    pub fn start(&mut self) {
        info!(
            "Starting with service directory {}",
            self.state.settings.services.directory.display()
        );
        self.process_message(Message::Refresh);
    }

    /// Run a message and any follow-ups through `update`, dispatching actions
    pub fn process_message(&mut self, msg: Message) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            let result = handler::update(&mut self.state, msg);
            if let Some(action) = result.action {
                actions::handle_action(action, self.msg_tx.clone(), Arc::clone(&self.controller));
            }
            next = result.message;
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. The TUI runner calls this
    /// before every render.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` if the channel is closed.
    pub async fn process_next_message(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Process messages until no command is in flight
    pub async fn wait_until_idle(&mut self) {
        while self.state.session.is_busy() {
            if !self.process_next_message().await {
                break;
            }
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }
}
