use tracing::info;

use crate::error::OperationError;
use crate::traits::{InteractionProvider, PromptInput};

/// Interaction provider for runs without a terminal.
///
/// Output goes to the log. Any question fails with
/// [`OperationError::InteractionRequired`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractiveProvider;

impl InteractionProvider for NonInteractiveProvider {
    fn show(&self, text: &str) {
        info!("{text}");
    }

    fn title(&self, text: &str) {
        info!("== {text} ==");
    }

    fn prompt(&self, _question: &str) -> crate::Result<PromptInput> {
        Err(OperationError::InteractionRequired)
    }

    fn confirm(&self, _question: &str) -> crate::Result<bool> {
        Err(OperationError::InteractionRequired)
    }

    fn pause(&self) -> crate::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_require_interaction() {
        let provider = NonInteractiveProvider;

        assert!(matches!(
            provider.prompt("name?"),
            Err(OperationError::InteractionRequired)
        ));
        assert!(matches!(
            provider.confirm("ok?"),
            Err(OperationError::InteractionRequired)
        ));
    }

    #[test]
    fn pause_does_not_block() {
        assert!(NonInteractiveProvider.pause().is_ok());
    }
}
