use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use reconic_common::warn;
use reconic_core::engine::StopSignal;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw-mode key reader that raises the stop signal on `q` or Ctrl-C.
///
/// Raw mode is left again when the handle is dropped.
pub struct InputHandle {
    done: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl InputHandle {
    pub fn start(stop: StopSignal) -> Self {
        let done: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
        let reader_done: Arc<AtomicBool> = Arc::clone(&done);

        let reader = thread::spawn(move || {
            if let Err(e) = enable_raw_mode() {
                debug!("keyboard input disabled: {e}");
                return;
            }

            while !reader_done.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(_) => break,
                }

                let Ok(Event::Key(key_event)) = event::read() else {
                    continue;
                };
                if is_interrupt(&key_event) {
                    warn!("Stopping, waiting for in-flight probes to finish");
                    stop.raise();
                    break;
                }
            }

            let _ = disable_raw_mode();
        });

        Self {
            done,
            reader: Some(reader),
        }
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        let _ = disable_raw_mode();
    }
}

/// Exit status after a second Ctrl-C, as if SIGINT had killed the process.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum CtrlC {
    Stop,
    Exit,
}

/// Handles SIGINT outside raw mode (`--no-input`, no terminal, or between scans).
///
/// The first Ctrl-C raises the stop signal and lets in-flight probes drain;
/// another one while draining exits right away.
pub fn watch_ctrl_c(stop: StopSignal) {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if on_ctrl_c(&stop) == CtrlC::Exit {
                let _ = disable_raw_mode();
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
            warn!("Stopping, press Ctrl-C again to quit without waiting");
        }
    });
}

fn on_ctrl_c(stop: &StopSignal) -> CtrlC {
    if stop.is_raised() {
        return CtrlC::Exit;
    }
    stop.raise();
    CtrlC::Stop
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    let is_q: bool = key_event.code == KeyCode::Char('q');
    let is_ctrl_c: bool = key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL);

    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
