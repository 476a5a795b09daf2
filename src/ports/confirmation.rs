//! Confirmation dialog contract.

use std::fmt;

use async_trait::async_trait;

/// Content of a yes/no dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// Dialog title.
    pub title: String,
    /// Question shown to the user.
    pub message: String,
    /// Label of the confirming button.
    pub confirm_label: String,
}

impl ConfirmationPrompt {
    /// Prompt asking to delete the named entity.
    #[must_use]
    pub fn delete(entity_label: &str, display_name: &str) -> Self {
        Self {
            title: format!("Delete {entity_label}"),
            message: format!(
                "Are you sure you want to delete {entity_label} \"{display_name}\"? This cannot be undone."
            ),
            confirm_label: "Delete".to_string(),
        }
    }
}

/// How the user closed the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The user explicitly confirmed.
    Confirmed,
    /// The user cancelled or closed the dialog.
    Dismissed,
}

/// Modal surface resolving asynchronously to a [`ConfirmOutcome`].
#[async_trait]
pub trait ConfirmationSurface: Send + Sync + fmt::Debug {
    /// Presents the prompt and waits for the user's answer.
    async fn confirm(&self, prompt: ConfirmationPrompt) -> ConfirmOutcome;
}

/// Surface that always answers the same way without showing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfirmation(pub ConfirmOutcome);

impl FixedConfirmation {
    /// Always confirms.
    #[must_use]
    pub const fn accept() -> Self {
        Self(ConfirmOutcome::Confirmed)
    }

    /// Always dismisses.
    #[must_use]
    pub const fn dismiss() -> Self {
        Self(ConfirmOutcome::Dismissed)
    }
}

#[async_trait]
impl ConfirmationSurface for FixedConfirmation {
    async fn confirm(&self, prompt: ConfirmationPrompt) -> ConfirmOutcome {
        tracing::debug!(title = %prompt.title, outcome = ?self.0, "auto-answering confirmation");
        self.0
    }
}
