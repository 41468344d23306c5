use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::model::{ChatCompletionRequest, ChatCompletionResponse};
use crate::providers::http_errors::{api_body_error, api_request_error};

/// Sends one chat completion request and decodes whatever JSON comes back.
/// API-level errors are left in the response for [`first_choice_text`].
pub async fn chat_completion(
    client: &Client,
    cfg: &Config,
    request: &ChatCompletionRequest,
) -> Result<ChatCompletionResponse, AppError> {
    let api_url = cfg.chat_completions_url();
    let body = serde_json::to_vec(request).map_err(AppError::Serialize)?;
    debug!(
        api_url = %api_url,
        model = %request.model,
        message_count = request.messages.len(),
        role = request.messages.first().map(|msg| msg.role.as_str()).unwrap_or_default(),
        body_len = body.len(),
        "sending chat completion request"
    );

    let response = client
        .post(&api_url)
        .header(CONTENT_TYPE, "application/json")
        .bearer_auth(&cfg.api_key)
        .body(body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %request.model,
                error = %err,
                "chat completion request failed"
            );
            api_request_error(err, &api_url)
        })?;

    let status = response.status();
    let response_body = response
        .bytes()
        .await
        .map_err(|err| api_body_error(err, &api_url))?;
    if !status.is_success() {
        warn!(
            api_url = %api_url,
            model = %request.model,
            status = %status,
            response_body_len = response_body.len(),
            "OpenAI API returned non-success status"
        );
    }

    let parsed: ChatCompletionResponse =
        serde_json::from_slice(&response_body).map_err(AppError::Deserialize)?;
    debug!(
        status = %status,
        choice_count = parsed.choices().len(),
        total_tokens = parsed.usage.as_ref().map(|usage| usage.total_tokens),
        "received chat completion response"
    );
    Ok(parsed)
}

/// Extracts the first completion, surfacing an API error payload first.
/// A string `code` (as in `"invalid_api_key"`) is reported like a numeric one
/// instead of failing the decode.
pub fn first_choice_text(response: &ChatCompletionResponse) -> Result<String, AppError> {
    if let Some(error) = &response.error {
        let message = error.message.as_deref().unwrap_or_default();
        if !message.is_empty() {
            return Err(AppError::Api {
                message: message.to_string(),
                code: error
                    .code
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "0".to_string()),
                kind: error.kind.clone().unwrap_or_default(),
            });
        }
    }

    response
        .choices()
        .first()
        .map(|choice| choice.content().to_string())
        .ok_or(AppError::NoChoices)
}
