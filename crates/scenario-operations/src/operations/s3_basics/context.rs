use std::sync::Arc;

use super::data::S3BasicsSettings;
use crate::traits::{InteractionProvider, S3Provider};

pub struct S3BasicsContext<P, U> {
    settings: S3BasicsSettings,
    s3: Arc<P>,
    interaction: Arc<U>,
}

impl<P, U> S3BasicsContext<P, U>
where
    P: S3Provider,
    U: InteractionProvider,
{
    pub fn new(settings: S3BasicsSettings, s3: Arc<P>, interaction: Arc<U>) -> Self {
        Self {
            settings,
            s3,
            interaction,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &S3BasicsSettings {
        &self.settings
    }

    #[must_use]
    pub fn s3(&self) -> &P {
        &self.s3
    }

    #[must_use]
    pub fn interaction(&self) -> &U {
        &self.interaction
    }
}
