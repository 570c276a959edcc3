use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Provided(String),
    Cancelled,
}

pub trait InteractionProvider: Send + Sync {
    /// Print a line of text for the user.
    fn show(&self, text: &str);

    /// Print a section heading.
    fn title(&self, text: &str);

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn prompt(&self, question: &str) -> Result<PromptInput>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Wait for the user to press Enter.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn pause(&self) -> Result<()>;
}

/// Ask `question` until the answer is not blank. `retry` is asked on every
/// attempt after the first.
///
/// # Errors
///
/// Returns an error if the provider fails.
pub fn prompt_non_empty<P>(provider: &P, question: &str, retry: &str) -> Result<PromptInput>
where
    P: InteractionProvider + ?Sized,
{
    let mut current = question;
    loop {
        match provider.prompt(current)? {
            PromptInput::Provided(answer) if !answer.trim().is_empty() => {
                return Ok(PromptInput::Provided(answer.trim().to_string()));
            }
            PromptInput::Provided(_) => current = retry,
            PromptInput::Cancelled => return Ok(PromptInput::Cancelled),
        }
    }
}
