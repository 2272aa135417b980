//! Main TUI runner - entry point and event loop

use initdeck_app::{Engine, Settings};
use initdeck_control::ServiceController;
use initdeck_core::prelude::*;

use crate::{event, render, terminal};

/// Run the interactive dashboard until the operator quits.
///
/// Terminal initialisation failure is returned as
/// [`Error::TerminalInit`]; everything after that is recoverable and shown
/// in the UI.
pub async fn run<C>(settings: Settings, controller: C) -> Result<()>
where
    C: ServiceController + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    let mut engine = Engine::new(settings, controller);
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    terminal::restore();

    if let Some(pending) = engine.state.session.in_flight() {
        info!("Exiting while '{}' is still running", pending.label());
    }
    result
}

/// Main event loop
fn run_loop<C>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<C>) -> Result<()>
where
    C: ServiceController + Sync + 'static,
{
    while !engine.should_quit() {
        // Results from background commands and the signal handler
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("Quit requested");
    Ok(())
}
