use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::AppError;

/// Where the user turn comes from. A non-empty prompt file always wins over
/// the inline prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    File(PathBuf),
    Inline(String),
}

impl PromptSource {
    pub fn from_options(prompt: String, prompt_file: String) -> Self {
        if prompt_file.is_empty() {
            Self::Inline(prompt)
        } else {
            Self::File(PathBuf::from(prompt_file))
        }
    }

    /// File contents are used verbatim, trailing newline included. Bytes that
    /// are not valid UTF-8 become U+FFFD rather than failing the read.
    pub fn resolve(&self) -> Result<String, AppError> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File(path) => {
                let bytes = fs::read(path).map_err(|source| AppError::PromptFile {
                    path: path.clone(),
                    source,
                })?;
                let text = String::from_utf8_lossy(&bytes).into_owned();
                debug!(
                    path = %path.display(),
                    prompt_len = text.len(),
                    "read prompt file"
                );
                Ok(text)
            }
        }
    }
}
