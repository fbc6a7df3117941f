//! Desktop notifications.

use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

/// Delivers a user-visible alert. Implementations must not block the caller
/// and must swallow delivery failures.
pub trait Notifier {
    fn notify(&mut self, title: &str, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, title: &str, message: &str) {
        (**self).notify(title, message)
    }
}

/// Sends notifications through the desktop's command-line notifier
/// (`notify-send` on Linux, `osascript` on macOS).
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    fn command(title: &str, message: &str) -> Command {
        if cfg!(target_os = "macos") {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                escape_applescript(message),
                escape_applescript(title)
            );
            let mut cmd = Command::new("osascript");
            cmd.args(["-e", &script]);
            cmd
        } else {
            let mut cmd = Command::new("notify-send");
            cmd.args(["--app-name=pwrwatch", title, message]);
            cmd
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, title: &str, message: &str) {
        let spawned = Self::command(title, message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => debug!(error = %e, "Notification not delivered"),
        }
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&mut self, _title: &str, _message: &str) {}
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applescript_quotes_are_escaped() {
        assert_eq!(escape_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_applescript(r"a\b"), r"a\\b");
    }
}
