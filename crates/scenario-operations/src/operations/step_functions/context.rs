use std::sync::Arc;

use super::data::StepFunctionsSettings;
use crate::traits::{IamProvider, InteractionProvider, StepFunctionsProvider};

pub struct StepFunctionsContext<S, I, U> {
    settings: StepFunctionsSettings,
    step_functions: Arc<S>,
    iam: Arc<I>,
    interaction: Arc<U>,
}

impl<S, I, U> Clone for StepFunctionsContext<S, I, U> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            step_functions: Arc::clone(&self.step_functions),
            iam: Arc::clone(&self.iam),
            interaction: Arc::clone(&self.interaction),
        }
    }
}

impl<S, I, U> StepFunctionsContext<S, I, U>
where
    S: StepFunctionsProvider,
    I: IamProvider,
    U: InteractionProvider,
{
    pub fn new(
        settings: StepFunctionsSettings,
        step_functions: Arc<S>,
        iam: Arc<I>,
        interaction: Arc<U>,
    ) -> Self {
        Self {
            settings,
            step_functions,
            iam,
            interaction,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &StepFunctionsSettings {
        &self.settings
    }

    #[must_use]
    pub fn step_functions(&self) -> &S {
        &self.step_functions
    }

    #[must_use]
    pub fn iam(&self) -> &I {
        &self.iam
    }

    #[must_use]
    pub fn interaction(&self) -> &U {
        &self.interaction
    }
}
