//! Confirmation prompts shown before changing the install root.

use crate::package::PackageRecord;

use super::traits::Confirmation;

/// Title shown on every prompt.
pub const PROMPT_TITLE: &str = "pacspire";

/// Which decision a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Install a package that is not present yet.
    FreshInstall,
    /// Replace an installed build with a newer one.
    Upgrade,
    /// Replace an installed build with an equal or older one.
    SameOrOlder,
    /// Delete an installed package.
    Remove,
}

/// A yes/no question for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// What the prompt is for.
    pub kind: PromptKind,
    /// Window/dialog title.
    pub title: String,
    /// Question text.
    pub message: String,
    /// Label of the accepting choice.
    pub affirmative_label: String,
    /// Label of the declining choice.
    pub negative_label: String,
}

impl Prompt {
    fn new(kind: PromptKind, message: String, affirmative_label: &str) -> Self {
        Self {
            kind,
            title: PROMPT_TITLE.to_string(),
            message,
            affirmative_label: affirmative_label.to_string(),
            negative_label: "Cancel".to_string(),
        }
    }

    /// Ask whether to install a package that is not installed yet.
    pub fn fresh_install(incoming: &PackageRecord) -> Self {
        Self::new(
            PromptKind::FreshInstall,
            format!("Do you want to install {}?", incoming.name),
            "Install",
        )
    }

    /// Ask whether to upgrade `existing` to the newer `incoming`.
    pub fn upgrade(existing: &PackageRecord, incoming: &PackageRecord) -> Self {
        Self::new(
            PromptKind::Upgrade,
            format!(
                "Do you want to update {} ({} -> {})?",
                incoming.name, existing.version, incoming.version
            ),
            "Update",
        )
    }

    /// Ask whether to replace `existing` with an equal or older `incoming`.
    ///
    /// Equal and older builds share this wording.
    pub fn same_or_older(existing: &PackageRecord, incoming: &PackageRecord) -> Self {
        Self::new(
            PromptKind::SameOrOlder,
            format!(
                "The installed version of {} ({}) is newer than the one you are trying to install ({}). Continue?",
                incoming.name, existing.version, incoming.version
            ),
            "Continue",
        )
    }

    /// Ask whether to delete an installed package.
    pub fn remove(installed: &PackageRecord) -> Self {
        Self::new(
            PromptKind::Remove,
            format!(
                "Do you want to remove {} ({})?",
                installed.name, installed.version
            ),
            "Remove",
        )
    }
}

/// The user's answer to a [`Prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The affirmative choice was picked.
    Affirmative,
    /// The negative choice was picked.
    Negative,
    /// The prompt was closed without picking either choice.
    Dismissed,
}

impl Decision {
    /// Only an explicit affirmative answer counts as consent.
    pub fn is_affirmative(self) -> bool {
        self == Decision::Affirmative
    }
}

/// Answers every prompt affirmatively.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &Prompt) -> Decision {
        Decision::Affirmative
    }
}
