//! Top-level errors and their process exit codes

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;

/// Everything a command can fail with; printed by `main` before exiting.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("cannot {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(e))
    }
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// sysexits code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Io { .. } => exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Domain(d) | ApplicationError::InvalidInput { source: d, .. } => {
                    domain_exit_code(d)
                }
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => exitcode::NOINPUT,
            },
        }
    }
}

fn domain_exit_code(e: &DomainError) -> i32 {
    match e {
        DomainError::InvalidSplitTarget(_)
        | DomainError::RuleNotApplied { .. }
        | DomainError::DanglingNode => exitcode::SOFTWARE,
        DomainError::MalformedDepth { .. }
        | DomainError::InvalidLiteral { .. }
        | DomainError::NotEnoughNumbers { .. }
        | DomainError::StepLimitExceeded { .. }
        | DomainError::ValueOverflow { .. } => exitcode::DATAERR,
    }
}
