//! Interfaces the package command handlers depend on.

use pacspire::manager::{Confirmation, StatusReporter};

use crate::error::CliError;

/// Plain, unlevelled terminal output.
pub trait Output {
    /// Print a line.
    fn println(&self, message: &str);

    /// Print an empty line.
    fn newline(&self);

    /// Print a section header.
    fn header(&self, title: &str);

    /// Print an indented line.
    fn indented(&self, message: &str);
}

/// Everything a handler needs from its environment.
pub struct CommandContext<'a> {
    /// Plain output.
    pub output: &'a dyn Output,
    /// Leveled status events.
    pub reporter: &'a dyn StatusReporter,
    /// Answers prompts.
    pub interaction: &'a dyn Confirmation,
}

impl<'a> CommandContext<'a> {
    /// Create a new command context.
    pub fn new(
        output: &'a dyn Output,
        reporter: &'a dyn StatusReporter,
        interaction: &'a dyn Confirmation,
    ) -> Self {
        Self {
            output,
            reporter,
            interaction,
        }
    }
}

/// A package command.
pub trait CommandHandler {
    /// Arguments the command takes.
    type Args;

    /// Run the command.
    fn execute(args: Self::Args, ctx: &CommandContext) -> Result<(), CliError>;
}
