use std::path::PathBuf;

use thiserror::Error;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_SERIALIZE: u8 = 4;
pub const EXIT_TRANSPORT: u8 = 5;
pub const EXIT_DESERIALIZE: u8 = 6;
pub const EXIT_API: u8 = 7;
pub const EXIT_EMPTY_RESULT: u8 = 8;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("argument error: --apiKey was not provided")]
    MissingApiKey,

    #[error("Failed to read prompt file '{}'", path.display())]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode chat completion request")]
    Serialize(#[source] serde_json::Error),

    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse chat completion response")]
    Deserialize(#[source] serde_json::Error),

    #[error("OpenAI API returned an error: {message} (code {code}, type {kind})")]
    Api {
        message: String,
        code: String,
        kind: String,
    },

    #[error("OpenAI API did not return any text")]
    NoChoices,
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            // clap uses 0 for --help/--version and 2 for usage errors
            Self::Usage(err) => u8::try_from(err.exit_code()).unwrap_or(EXIT_CONFIG),
            Self::MissingApiKey => EXIT_CONFIG,
            Self::PromptFile { .. } => EXIT_INPUT,
            Self::Serialize(_) => EXIT_SERIALIZE,
            Self::Transport { .. } => EXIT_TRANSPORT,
            Self::Deserialize(_) => EXIT_DESERIALIZE,
            Self::Api { .. } => EXIT_API,
            Self::NoChoices => EXIT_EMPTY_RESULT,
        }
    }
}
