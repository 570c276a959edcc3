use std::fmt;
use std::io::IsTerminal;

const NO_TTY_VAR: &str = "AWS_SCENARIOS_NO_TTY";
const FORCE_TTY_VAR: &str = "AWS_SCENARIOS_FORCE_TTY";

const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
    "CODEBUILD_BUILD_ID",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: String },
    NoTerminal,
}

impl fmt::Display for NonInteractiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitDisable => write!(f, "{NO_TTY_VAR} is set"),
            Self::CiDetected { env_var } => write!(f, "CI environment detected ({env_var})"),
            Self::NoTerminal => f.write_str("stdin is not a terminal"),
        }
    }
}

/// Why prompts cannot be shown in this process, or `None` if they can.
pub fn non_interactive_reason() -> Option<NonInteractiveReason> {
    detect(|name| std::env::var_os(name).is_some(), || std::io::stdin().is_terminal())
}

/// `AWS_SCENARIOS_NO_TTY` beats `AWS_SCENARIOS_FORCE_TTY`, which beats CI
/// detection and the terminal check.
fn detect(
    is_set: impl Fn(&str) -> bool,
    stdin_is_terminal: impl FnOnce() -> bool,
) -> Option<NonInteractiveReason> {
    if is_set(NO_TTY_VAR) {
        return Some(NonInteractiveReason::ExplicitDisable);
    }
    if is_set(FORCE_TTY_VAR) {
        return None;
    }
    if let Some(env_var) = CI_ENV_VARS.iter().find(|var| is_set(var)) {
        return Some(NonInteractiveReason::CiDetected {
            env_var: (*env_var).to_string(),
        });
    }
    if !stdin_is_terminal() {
        return Some(NonInteractiveReason::NoTerminal);
    }
    None
}
