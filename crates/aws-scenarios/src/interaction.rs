use std::io::{self, ErrorKind, Write as _};

use dialoguer::{Confirm, Input};
use scenario_operations::traits::{InteractionProvider, PromptInput};
use scenario_operations::{OperationError, Result};

const TITLE_WIDTH: usize = 72;

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalInteraction;

impl InteractionProvider for TerminalInteraction {
    fn show(&self, text: &str) {
        println!("{text}");
    }

    fn title(&self, text: &str) {
        let rule = "-".repeat(TITLE_WIDTH.max(text.chars().count()));
        println!();
        println!("{rule}");
        println!("{text}");
        println!("{rule}");
    }

    fn prompt(&self, question: &str) -> Result<PromptInput> {
        let answer = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(answer) => Ok(PromptInput::Provided(answer)),
            Err(dialoguer::Error::IO(err)) if ends_input(err.kind()) => Ok(PromptInput::Cancelled),
            Err(dialoguer::Error::IO(err)) => Err(OperationError::Io(err)),
        }
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact_opt()
            .map_err(|e| match e {
                dialoguer::Error::IO(err) => OperationError::Io(err),
            })?;
        Ok(answer.unwrap_or(false))
    }

    fn pause(&self) -> Result<()> {
        print!("Press Enter to continue...");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(())
    }
}

/// EOF (Ctrl-D) or an interrupted read ends the conversation.
fn ends_input(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::UnexpectedEof | ErrorKind::Interrupted)
}
