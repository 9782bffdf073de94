// src/error.rs
use thiserror::Error;

/// Everything the pipeline can fail with, one variant per user-visible kind.
/// The CLI maps these onto process exit codes; see [`Error::exit_code`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message} [at line {line}, column {column}]")]
    SpecSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("token kind `{name}` defined twice (lines {first_line} and {second_line})")]
    DuplicateToken {
        name: String,
        first_line: usize,
        second_line: usize,
    },

    #[error("{message} [at position {position}]")]
    RegexSyntax { position: usize, message: String },

    #[error("{message} [at position {position}]")]
    RegexSemantic { position: usize, message: String },

    #[error("pattern for `{token}` has an empty alphabet")]
    EmptyAlphabet { token: String },

    // Internal invariant: minimization was handed an automaton with no states.
    #[error("cannot minimize an automaton with no states")]
    EmptyLanguage,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The stage label used in CLI diagnostics (`error: <stage>: <message>`).
    pub fn stage(&self) -> &'static str {
        match self {
            Error::SpecSyntax { .. } | Error::DuplicateToken { .. } => "spec",
            Error::RegexSyntax { .. } | Error::RegexSemantic { .. } => "regex",
            Error::EmptyAlphabet { .. } | Error::EmptyLanguage => "automata",
            Error::Io(_) => "io",
        }
    }

    /// Process exit code for the CLI. Usage errors (missing argument, bad
    /// extension) exit with 1 before an `Error` ever exists.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::SpecSyntax { .. } | Error::DuplicateToken { .. } => 2,
            Error::RegexSyntax { .. }
            | Error::RegexSemantic { .. }
            | Error::EmptyAlphabet { .. }
            | Error::EmptyLanguage => 3,
            Error::Io(_) => 4,
        }
    }

    /// Prefix the message of a regex error with the owning token kind so the
    /// single CLI diagnostic names the offending definition.
    pub fn in_pattern(self, token: &str) -> Error {
        match self {
            Error::RegexSyntax { position, message } => Error::RegexSyntax {
                position,
                message: format!("in pattern for `{token}`: {message}"),
            },
            Error::RegexSemantic { position, message } => Error::RegexSemantic {
                position,
                message: format!("in pattern for `{token}`: {message}"),
            },
            other => other,
        }
    }
}
