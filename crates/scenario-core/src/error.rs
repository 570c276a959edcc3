use thiserror::Error;

/// Failure reported by a service client adapter.
///
/// Carries the AWS error code when the service returned one, and whether the
/// code is known to be transient. Adapters never retry on their own; the flag
/// only informs callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}{}", code_suffix(code.as_deref()))]
pub struct ServiceError {
    pub operation: String,
    pub code: Option<String>,
    pub message: String,
    pub retryable: bool,
}

fn code_suffix(code: Option<&str>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

/// Codes AWS services use when the addressed resource does not exist.
const NOT_FOUND_CODES: &[&str] = &[
    "NoSuchEntity",
    "NoSuchBucket",
    "NoSuchKey",
    "ActivityDoesNotExist",
    "StateMachineDoesNotExist",
    "ExecutionDoesNotExist",
    "ResourceNotFoundException",
    "NotFoundException",
    "AWS.SimpleQueueService.NonExistentQueue",
    "QueueDoesNotExist",
    "RuleSetDoesNotExist",
];

/// Codes AWS services use when a resource with the same name already exists.
const ALREADY_EXISTS_CODES: &[&str] = &[
    "EntityAlreadyExists",
    "BucketAlreadyOwnedByYou",
    "BucketAlreadyExists",
    "ActivityAlreadyExists",
    "StateMachineAlreadyExists",
    "ExecutionAlreadyExists",
    "AlreadyExistsException",
    "AlreadyExists",
    "QueueAlreadyExists",
];

/// Codes that indicate a transient condition worth retrying.
const RETRYABLE_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "ProvisionedThroughputExceededException",
    "SlowDown",
    "ServiceUnavailable",
    "ServiceUnavailableException",
    "InternalFailure",
    "InternalServerError",
    "RequestTimeout",
    "RequestTimeoutException",
];

/// Error code to user-friendly suggestion mapping.
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "AccessDenied",
        "Check that the active credentials allow this operation.",
    ),
    (
        "AccessDeniedException",
        "Check that the active credentials allow this operation.",
    ),
    (
        "UnrecognizedClientException",
        "The credentials are not valid for this region or endpoint.",
    ),
    (
        "ExpiredToken",
        "The session token has expired; refresh your credentials.",
    ),
    (
        "ExpiredTokenException",
        "The session token has expired; refresh your credentials.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Wait a moment and run the command again.",
    ),
    (
        "ThrottlingException",
        "AWS API rate limit hit. Wait a moment and run the command again.",
    ),
];

impl ServiceError {
    /// Build an error from the code and message an AWS service returned.
    #[must_use]
    pub fn from_parts(
        operation: impl Into<String>,
        code: Option<&str>,
        message: Option<&str>,
    ) -> Self {
        Self {
            operation: operation.into(),
            code: code.map(ToString::to_string),
            message: message.unwrap_or("unknown error").to_string(),
            retryable: code.is_some_and(|c| RETRYABLE_CODES.contains(&c)),
        }
    }

    /// Build an error that did not come from the service, such as a missing
    /// field in an otherwise successful response.
    #[must_use]
    pub fn unexpected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            code: None,
            message: message.into(),
            retryable: false,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| NOT_FOUND_CODES.contains(&c))
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| ALREADY_EXISTS_CODES.contains(&c))
    }

    /// A hint for resolving this error, if the code is a well-known one.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        let code = self.code.as_deref()?;
        SUGGESTIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, s)| *s)
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_are_classified() {
        for code in NOT_FOUND_CODES {
            let err = ServiceError::from_parts("GetRole", Some(*code), Some("missing"));
            assert!(err.is_not_found(), "expected not-found for {code}");
            assert!(!err.retryable);
        }
    }

    #[test]
    fn already_exists_codes_are_classified() {
        for code in ALREADY_EXISTS_CODES {
            let err = ServiceError::from_parts("CreateRole", Some(*code), Some("exists"));
            assert!(err.is_already_exists(), "expected already-exists for {code}");
        }
    }

    #[test]
    fn retryable_codes_set_flag() {
        for code in RETRYABLE_CODES {
            let err = ServiceError::from_parts("ListExecutions", Some(*code), None);
            assert!(err.retryable, "expected retryable for {code}");
        }
    }

    #[test]
    fn missing_code_is_not_retryable() {
        let err = ServiceError::from_parts("StartExecution", None, Some("boom"));

        assert!(!err.retryable);
        assert!(!err.is_not_found());
        assert_eq!(err.code, None);
    }

    #[test]
    fn missing_message_uses_placeholder() {
        let err = ServiceError::from_parts("StartExecution", Some("X"), None);

        assert_eq!(err.message, "unknown error");
    }

    #[test]
    fn display_includes_operation_message_and_code() {
        let err = ServiceError::from_parts(
            "CreateActivity",
            Some("InvalidName"),
            Some("name is invalid"),
        );

        assert_eq!(
            err.to_string(),
            "CreateActivity failed: name is invalid (InvalidName)"
        );
    }

    #[test]
    fn display_without_code_omits_parentheses() {
        let err = ServiceError::unexpected("GetRole", "response had no role");

        assert_eq!(err.to_string(), "GetRole failed: response had no role");
    }

    #[test]
    fn suggestion_for_known_code() {
        let err = ServiceError::from_parts("GetRole", Some("AccessDenied"), None);

        assert!(err.suggestion().is_some());
        assert!(
            ServiceError::from_parts("GetRole", Some("Whatever"), None)
                .suggestion()
                .is_none()
        );
    }
}
