use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::sleep;
use toasts::{Subscription, Toast, ToastId, ToastManager};
use tracing::{debug, info};

/// Lifetime used for toasts that carry no duration hint.
pub const FALLBACK_LIFETIME: Duration = Duration::from_secs(5);

/// Console stand-in for a toast widget layer.
///
/// Redraws the list on every change and owns auto-dismiss timing: each new
/// toast gets a local task that fires its bound dismiss once its lifetime has
/// elapsed. Must be attached from within a `LocalSet`.
pub struct ConsoleDisplay {
    emptied: Rc<Notify>,
    _subscription: Subscription,
}

impl ConsoleDisplay {
    pub fn attach(manager: &ToastManager, fallback: Duration) -> Self {
        let emptied = Rc::new(Notify::new());
        let scheduled: Rc<RefCell<HashSet<ToastId>>> = Rc::default();

        let signal = Rc::clone(&emptied);
        let subscription = manager.subscribe(move |toasts| {
            print_frame(&render(toasts));
            schedule_new(toasts, &scheduled, fallback);
            if toasts.is_empty() {
                signal.notify_one();
            }
        });

        Self {
            emptied,
            _subscription: subscription,
        }
    }

    /// Resolves once the list has been observed empty after a change.
    pub async fn emptied(&self) {
        self.emptied.notified().await;
    }
}

fn schedule_new(toasts: &[Toast], scheduled: &RefCell<HashSet<ToastId>>, fallback: Duration) {
    let mut scheduled = scheduled.borrow_mut();
    scheduled.retain(|id| toasts.iter().any(|toast| toast.id() == id));

    for toast in toasts {
        if !scheduled.insert(toast.id().clone()) {
            continue;
        }
        let lifetime = toast.duration().unwrap_or(fallback);
        let dismiss = toast.on_dismiss().clone();
        debug!(id = %toast.id(), ?lifetime, "auto-dismiss scheduled");
        tokio::task::spawn_local(async move {
            sleep(lifetime).await;
            if dismiss.dismiss() {
                info!(id = %dismiss.id(), "toast expired");
            }
        });
    }
}

fn print_frame(frame: &str) {
    if let Err(err) = write_frame(&mut std::io::stdout().lock(), frame) {
        debug!(error = %err, "failed to write toast frame");
    }
}

fn write_frame(out: &mut impl io::Write, frame: &str) -> io::Result<()> {
    out.write_all(frame.as_bytes())?;
    out.flush()
}

pub fn render(toasts: &[Toast]) -> String {
    if toasts.is_empty() {
        return "(no toasts)\n".to_string();
    }
    let mut frame = String::new();
    for toast in toasts {
        let _ = write!(frame, "[{:<7}] {}", toast.kind(), toast.title());
        if let Some(message) = toast.message() {
            let _ = write!(frame, ": {message}");
        }
        if let Some(duration) = toast.duration() {
            let _ = write!(frame, " ({})", humantime::format_duration(duration));
        }
        frame.push('\n');
    }
    frame.push_str("--\n");
    frame
}
