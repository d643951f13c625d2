//! Terminal entry point.
//!
//! Wires the library together and runs two tasks:
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────┐
//! │ stdin reader         │ Event  │ Runtime                  │
//! │ parse_command(line)  ├───────►│ handle_event → actions   │
//! └──────────────────────┘        │ spawned fetches ─┐       │
//!                                 │        ▲         │       │
//!                                 │        └─ Event ─┘       │
//!                                 │ TerminalPresenter → tty  │
//!                                 └──────────────────────────┘
//! ```
//!
//! The reader sends `Quit` on end of input (Ctrl-D).

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead, Stdout};
use std::process::ExitCode;

use cinesearch::app::{present, PresenterEvent};
use cinesearch::client::ReqwestTransport;
use cinesearch::runtime::{EventSender, Runtime};
use cinesearch::storage;
use cinesearch::ui::TerminalPresenter;
use cinesearch::{build_client, initialize, load_themes, parse_command, Config, Event};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "cinesearch exited with an error");
            eprintln!("cinesearch: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> cinesearch::Result<()> {
    let config = Config::discover()?;
    cinesearch::observability::init_tracing(&config);

    let span = tracing::info_span!("startup");
    let (state, client, presenter) = {
        let _guard = span.enter();
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "cinesearch starting");

        let client = build_client(&config)?;
        let storage = storage::open_default(&config.data_dir);
        let state = initialize(&config, storage);
        let presenter = TerminalPresenter::new(io::stdout(), load_themes(&config), state.theme_mode());
        (state, client, presenter)
    };

    let mut runtime = Runtime::new(state, client, presenter);

    let welcome = runtime.state().session.snapshot();
    present(runtime.presenter_mut(), &PresenterEvent::SessionStateChanged(welcome));
    runtime.presenter_mut().prompt();

    let sender = runtime.sender();
    std::thread::spawn(move || read_commands(sender));

    run_loop(&mut runtime).await
}

/// Dispatches events until quit, redrawing the prompt after each one.
async fn run_loop(runtime: &mut Runtime<ReqwestTransport, TerminalPresenter<Stdout>>) -> cinesearch::Result<()> {
    while runtime.pump().await? {
        runtime.presenter_mut().prompt();
    }
    tracing::info!("cinesearch stopped");
    Ok(())
}

/// Turns stdin lines into events until end of input.
///
/// Runs on its own thread with blocking reads: a blocked tokio stdin read
/// would keep the runtime from shutting down after `:quit`.
fn read_commands(sender: EventSender) {
    for line in io::stdin().lock().lines() {
        let event = match line {
            Ok(line) => match parse_command(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "unparseable command");
                    // Routed through the loop so the message is rendered in order.
                    Event::CommandRejected(e.to_string())
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let quitting = event == Event::Quit;
        if sender.send(event).is_err() || quitting {
            return;
        }
    }

    let _ = sender.send(Event::Quit);
}
