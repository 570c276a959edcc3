use std::error::Error;

use aws_sdk_sfn::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_sfn::primitives::DateTime as SdkDateTime;
use chrono::{DateTime, Utc};
use scenario_core::ServiceError;

/// Turn any SDK error into a `ServiceError` for `operation`.
///
/// Errors that never reached the service (timeouts, dispatch failures) have
/// no message in their metadata; their full error chain is used instead.
pub(crate) fn service_error<E>(operation: &str, err: E) -> ServiceError
where
    E: ProvideErrorMetadata + Error,
{
    let code = err.code().map(ToString::to_string);
    let message = err
        .message()
        .map_or_else(|| DisplayErrorContext(&err).to_string(), ToString::to_string);
    ServiceError::from_parts(operation, code.as_deref(), Some(&message))
}

pub(crate) fn timestamp(value: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_converts_seconds_and_nanos() {
        let converted = timestamp(&SdkDateTime::from_secs_and_nanos(1_700_000_000, 500))
            .expect("valid timestamp");

        assert_eq!(converted.timestamp(), 1_700_000_000);
        assert_eq!(converted.timestamp_subsec_nanos(), 500);
    }
}
