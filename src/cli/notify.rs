//! Notifiers for the rotation protocol.
//!
//! On a terminal, progress is printed as styled step lines. Inside GitHub
//! Actions (`GITHUB_ACTIONS=true`) lines are plain and the failure is
//! emitted as an `::error::` workflow command so it is annotated on the run.

use crate::cli::output;
use crate::core::rotation::Notifier;

/// Styled terminal output.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        output::step(message);
    }

    fn report_failure(&self, message: &str) {
        output::error(message);
    }
}

/// GitHub Actions workflow command output.
pub struct ActionsNotifier;

impl ActionsNotifier {
    /// Escape a message for use as a workflow command value.
    pub fn escape(message: &str) -> String {
        message
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A")
    }
}

impl Notifier for ActionsNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }

    fn report_failure(&self, message: &str) {
        println!("::error::{}", Self::escape(message));
        eprintln!("{}", message);
    }
}

/// Whether the process runs inside a GitHub Actions job.
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Pick the notifier for the current environment.
pub fn detect() -> Box<dyn Notifier> {
    if in_github_actions() {
        Box::new(ActionsNotifier)
    } else {
        Box::new(TerminalNotifier)
    }
}
