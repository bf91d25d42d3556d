//! CLI-specific error types and exit code mapping

use ceelog_codec::CodecError;
use ceelog_core::error::CeeError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The input file could not be opened.
    #[error("{path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Decoding stopped at a bad line or a failed write.
    #[error("error {code} in decoding stage: {0}", code = .0.code())]
    Decode(#[source] CeeError),

    /// Codec construction failed (unknown codec, bad name list).
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from ceelog-core.
    #[error("{0}")]
    Core(#[from] CeeError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                  |
    /// |------|--------------------------|
    /// | 0    | Success                  |
    /// | 1    | General / command error  |
    /// | 2    | Configuration error      |
    /// | 3    | Decoding error           |
    /// | 10   | IO error                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Codec(_) => 2,
            Self::Core(CeeError::Config(_)) => 2,
            Self::Decode(_) => 3,
            Self::Input { .. } | Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}
