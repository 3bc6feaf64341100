//! Terminal implementations of the handler interfaces.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use pacspire::manager::{Confirmation, Decision, Prompt, StatusLevel, StatusReporter};

use super::traits::Output;

/// Writes to stdout, with colours when the terminal supports them.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    /// Create a new console output.
    pub fn new() -> Self {
        Self
    }
}

impl Output for ConsoleOutput {
    fn println(&self, message: &str) {
        println!("{}", message);
    }

    fn newline(&self) {
        println!();
    }

    fn header(&self, title: &str) {
        println!("{}", style(title).bold());
        println!("{}", "=".repeat(title.chars().count()));
    }

    fn indented(&self, message: &str) {
        println!("  {}", message);
    }
}

impl StatusReporter for ConsoleOutput {
    fn report(&self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Info => println!("{}", message),
            StatusLevel::Success => println!("{}", style(message).green()),
            StatusLevel::Warning => println!("{}", style(message).yellow()),
            StatusLevel::Error => eprintln!("{}", style(message).red().bold()),
        }
    }
}

/// Asks prompts on the terminal with a two-item selection.
#[derive(Debug, Default)]
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    /// Create a new console interaction.
    pub fn new() -> Self {
        Self
    }
}

impl Confirmation for ConsoleInteraction {
    fn confirm(&self, prompt: &Prompt) -> Decision {
        let term = Term::stderr();
        if !term.is_term() {
            tracing::warn!(kind = ?prompt.kind, "No terminal to prompt on; treating as dismissed");
            return Decision::Dismissed;
        }

        println!("{}", style(&prompt.title).cyan().bold());
        let items = [&prompt.affirmative_label, &prompt.negative_label];
        let answer = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(&prompt.message)
            .items(&items)
            .default(0)
            .interact_on_opt(&term);

        match answer {
            Ok(Some(0)) => Decision::Affirmative,
            Ok(Some(_)) => Decision::Negative,
            Ok(None) => Decision::Dismissed,
            Err(e) => {
                tracing::warn!(error = %e, "Prompt failed");
                Decision::Dismissed
            }
        }
    }
}
