use std::sync::Mutex;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use colored::*;
use indicatif::ProgressStyle;
use reconic_core::engine::ProgressReporter;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TIP_DURATION: Duration = Duration::from_secs(3);
const TIPS: &[&str] = &["Press 'q' to stop early, in-flight probes still finish"];
const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Message {
    Progress { completed: usize, total: usize },
    Finished { completed: usize, total: usize },
    Close,
}

/// Progress bar attached to a tracing span.
///
/// Dispatcher ticks only push onto a channel. A render thread drains it,
/// keeps the newest update and redraws, so reporting never blocks a scan.
pub struct SpinnerHandle {
    tx: Sender<Message>,
    render: Mutex<Option<JoinHandle<()>>>,
}

impl SpinnerHandle {
    pub fn start(span: Span, label: &str, show_tips: bool) -> Self {
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.blue} {msg} [{bar:24.green/bright_black}] {pos}/{len}",
        ) {
            span.pb_set_style(&style.tick_strings(TICK_STRINGS));
        }
        span.pb_set_message(label);

        let (tx, rx) = mpsc::channel::<Message>();
        let label: String = label.to_string();

        let render: JoinHandle<()> = thread::spawn(move || {
            let mut tip_index: usize = 0;

            loop {
                let first: Message = match rx.recv_timeout(TIP_DURATION) {
                    Ok(message) => message,
                    Err(RecvTimeoutError::Timeout) => {
                        if show_tips {
                            let tip: &str = TIPS[tip_index % TIPS.len()];
                            span.pb_set_message(&format!("{}", tip.italic().white()));
                            tip_index += 1;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                let mut latest: Option<(usize, usize)> = None;
                let mut closing: bool = false;
                for message in std::iter::once(first).chain(rx.try_iter()) {
                    match message {
                        Message::Progress { completed, total } => {
                            latest = Some((completed, total));
                        }
                        Message::Finished { completed, total } => {
                            latest = Some((completed, total));
                            closing = true;
                        }
                        Message::Close => closing = true,
                    }
                }

                if let Some((completed, total)) = latest {
                    span.pb_set_length(total as u64);
                    span.pb_set_position(completed as u64);
                    span.pb_set_message(&label);
                }
                if closing {
                    break;
                }
            }
        });

        Self {
            tx,
            render: Mutex::new(Some(render)),
        }
    }

    /// Stops the render thread once it has drawn everything queued so far.
    pub fn wait(&self) {
        let _ = self.tx.send(Message::Close);
        let handle: Option<JoinHandle<()>> = match self.render.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl ProgressReporter for SpinnerHandle {
    fn tick(&self, completed: usize, total: usize) {
        let _ = self.tx.send(Message::Progress { completed, total });
    }

    fn finish(&self, completed: usize, total: usize) {
        let _ = self.tx.send(Message::Finished { completed, total });
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
