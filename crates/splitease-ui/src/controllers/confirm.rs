//! Delete confirmation

use async_trait::async_trait;

use crate::page::Page;

pub const DEFAULT_DELETE_MESSAGE: &str = "Are you sure you want to delete this item?";

/// Host-supplied yes/no prompt
#[async_trait(?Send)]
pub trait ConfirmPrompt {
    async fn confirm(&self, message: &str) -> bool;
}

impl Page {
    /// Ask the host to confirm a deletion; warns "Deleting" when confirmed
    pub async fn confirm_delete<P>(&mut self, prompt: &P, message: Option<&str>) -> bool
    where
        P: ConfirmPrompt + ?Sized,
    {
        let message = message.unwrap_or(DEFAULT_DELETE_MESSAGE);
        let confirmed = prompt.confirm(message).await;
        if confirmed {
            self.warning("Deleting", "Removing item...");
        }
        log::debug!("delete confirmation: {}", confirmed);
        confirmed
    }
}
