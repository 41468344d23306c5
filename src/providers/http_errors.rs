use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::AppError;

fn error_chain_has_io_kind(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has_io_kind(err, ErrorKind::ConnectionRefused, "connection refused")
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has_io_kind(err, ErrorKind::TimedOut, "timed out")
}

/// Maps a failed send to a transport error with a hint about what to check.
pub(crate) fn api_request_error(err: reqwest::Error, api_url: &str) -> AppError {
    let message = if err.is_timeout() || error_chain_has_timeout(&err) {
        format!("Request to OpenAI API at '{api_url}' timed out. Check network connectivity.")
    } else if err.is_connect() && error_chain_has_connection_refused(&err) {
        format!(
            "Connection refused by OpenAI API at '{api_url}'. \
             Check OPENAI_BASE_URL if it is set."
        )
    } else if err.is_connect() {
        format!(
            "Failed to connect to OpenAI API at '{api_url}'. \
             Check DNS, TLS and network connectivity."
        )
    } else {
        format!("Failed to call OpenAI API at '{api_url}'")
    };

    AppError::Transport {
        message,
        source: err,
    }
}

/// The exchange started but the body could not be read to the end.
pub(crate) fn api_body_error(err: reqwest::Error, api_url: &str) -> AppError {
    AppError::Transport {
        message: format!("Failed to read response body from OpenAI API at '{api_url}'"),
        source: err,
    }
}
