pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod providers;

use std::ffi::OsString;
use std::io::Write;

use reqwest::Client;
use tracing::{debug, info};

use cli::Cli;
use config::Config;
use error::AppError;
use model::ChatCompletionRequest;
use providers::openai;

pub const OUTPUT_LABEL: &str = "Generated text: ";

/// Parses `args`, sends one chat completion request and writes the generated
/// text to `out`.
pub async fn run<I, T>(args: I, out: &mut impl Write) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    dotenvy::dotenv().ok();

    let cli = Cli::try_parse_args(args)?;
    let cfg = Config::from_cli(cli)?;
    info!(
        model = %cfg.model,
        max_tokens = cfg.max_tokens,
        api_url = %cfg.chat_completions_url(),
        "loaded runtime configuration"
    );
    if cfg.presence_penalty != cfg.frequency_penalty {
        debug!(
            presence_penalty = cfg.presence_penalty,
            frequency_penalty = cfg.frequency_penalty,
            "presence penalty option is not sent; request uses the frequency penalty for both"
        );
    }

    let prompt = cfg.prompt_source.resolve()?;
    let request = ChatCompletionRequest::new(&cfg, prompt);

    let client = Client::builder().build().map_err(|err| AppError::Transport {
        message: "Failed to initialize HTTP client".to_string(),
        source: err,
    })?;
    let response = openai::chat_completion(&client, &cfg, &request).await?;
    let text = openai::first_choice_text(&response)?;

    let _ = writeln!(out, "{OUTPUT_LABEL}{text}");
    Ok(())
}
