//! Seams between the installer and its environment.
//!
//! The installer never prints or prompts on its own. It asks a
//! [`Confirmation`] before changing anything on disk and reports progress to a
//! [`StatusReporter`], so the CLI, a GUI, or a test harness can each supply
//! their own.

use super::prompt::{Decision, Prompt};
use super::reporter::StatusLevel;

/// Asks the user a yes/no question.
///
/// Implementations block until an answer is available. Anything other than
/// [`Decision::Affirmative`] is treated as a refusal.
pub trait Confirmation {
    /// Present `prompt` and return the user's decision.
    fn confirm(&self, prompt: &Prompt) -> Decision;
}

/// Receives leveled status events from the installer.
pub trait StatusReporter {
    /// Report a status message at the given level.
    fn report(&self, level: StatusLevel, message: &str);

    /// Report progress.
    fn info(&self, message: &str) {
        self.report(StatusLevel::Info, message);
    }

    /// Report that a step completed.
    fn success(&self, message: &str) {
        self.report(StatusLevel::Success, message);
    }

    /// Report a non-fatal condition.
    fn warning(&self, message: &str) {
        self.report(StatusLevel::Warning, message);
    }

    /// Report a failure.
    fn error(&self, message: &str) {
        self.report(StatusLevel::Error, message);
    }
}
