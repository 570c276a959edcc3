//! Shared AWS configuration context.
//!
//! Configuration is loaded once and every service client is created from
//! the same `SdkConfig`.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde::Deserialize;
use tracing::debug;

/// Connection settings from the `[aws]` configuration section and the
/// command line. Anything left unset falls back to the SDK's own resolution
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsSettings {
    pub region: Option<String>,
    /// Alternate endpoint for every service, such as a LocalStack URL.
    pub endpoint_url: Option<String>,
    pub profile: Option<String>,
}

#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
    endpoint_override: bool,
}

impl AwsContext {
    /// Load AWS configuration, applying the given overrides.
    pub async fn load(settings: &AwsSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        debug!(
            region = config.region().map(Region::as_ref),
            endpoint = settings.endpoint_url.as_deref(),
            "loaded AWS configuration"
        );

        Self {
            config: Arc::new(config),
            endpoint_override: settings.endpoint_url.is_some(),
        }
    }

    #[must_use]
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.config.region().map(Region::as_ref)
    }

    #[must_use]
    pub fn sfn_client(&self) -> aws_sdk_sfn::Client {
        aws_sdk_sfn::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn iam_client(&self) -> aws_sdk_iam::Client {
        aws_sdk_iam::Client::new(self.sdk_config())
    }

    /// S3 client. Path-style addressing is forced when an endpoint override
    /// is set, since local emulators do not serve virtual-hosted buckets.
    #[must_use]
    pub fn s3_client(&self) -> aws_sdk_s3::Client {
        let config = aws_sdk_s3::config::Builder::from(self.sdk_config())
            .force_path_style(self.endpoint_override)
            .build();
        aws_sdk_s3::Client::from_conf(config)
    }

    #[must_use]
    pub fn sqs_client(&self) -> aws_sdk_sqs::Client {
        aws_sdk_sqs::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn kms_client(&self) -> aws_sdk_kms::Client {
        aws_sdk_kms::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn ses_client(&self) -> aws_sdk_ses::Client {
        aws_sdk_ses::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn sts_client(&self) -> aws_sdk_sts::Client {
        aws_sdk_sts::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn dynamodb_client(&self) -> aws_sdk_dynamodb::Client {
        aws_sdk_dynamodb::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn bedrock_client(&self) -> aws_sdk_bedrockruntime::Client {
        aws_sdk_bedrockruntime::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn sagemaker_client(&self) -> aws_sdk_sagemaker::Client {
        aws_sdk_sagemaker::Client::new(self.sdk_config())
    }

    #[must_use]
    pub fn mediaconvert_client(&self) -> aws_sdk_mediaconvert::Client {
        aws_sdk_mediaconvert::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.region())
            .field("endpoint_override", &self.endpoint_override)
            .finish_non_exhaustive()
    }
}
