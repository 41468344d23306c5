use std::env;
use std::fmt;

use crate::cli::Cli;
use crate::error::AppError;
use crate::prompt::PromptSource;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub prompt_source: PromptSource,
    pub max_tokens: i64,
    pub temperature: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub api_base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("prompt_source", &self.prompt_source)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("presence_penalty", &self.presence_penalty)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        Self::from_cli_with(cli, |key| env::var(key).ok())
    }

    fn from_cli_with(
        cli: Cli,
        mut get_var: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        if cli.api_key.is_empty() {
            return Err(AppError::MissingApiKey);
        }

        Ok(Self {
            api_key: cli.api_key,
            model: cli.model,
            prompt_source: PromptSource::from_options(cli.prompt, cli.prompt_file),
            max_tokens: cli.max_tokens,
            temperature: cli.temperature,
            frequency_penalty: cli.frequency_penalty,
            presence_penalty: cli.presence_penalty,
            api_base_url: parse_api_base_url(get_var("OPENAI_BASE_URL").as_deref()),
        })
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }
}

fn parse_api_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::{Config, DEFAULT_API_BASE_URL, parse_api_base_url};
    use crate::cli::{Cli, DEFAULT_PROMPT_FILE};
    use crate::error::AppError;
    use crate::prompt::PromptSource;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["gpt-prompt"];
        argv.extend_from_slice(args);
        Cli::try_parse_args(argv).expect("arguments should parse")
    }

    fn config_from(args: &[&str], pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Config::from_cli_with(cli(args), |key| vars.get(key).cloned())
    }

    #[test]
    fn from_cli_rejects_empty_api_key() {
        let err = config_from(&["-apiKey", "", "-promptFile", "", "-model", "x"], &[])
            .expect_err("empty api key should fail");
        assert!(matches!(err, AppError::MissingApiKey));
        assert!(err.to_string().contains("apiKey"));
    }

    #[test]
    fn from_cli_keeps_file_default_as_prompt_source() {
        let cfg = config_from(&["-apiKey", "k"], &[]).expect("config should build");
        assert_eq!(
            cfg.prompt_source,
            PromptSource::File(PathBuf::from(DEFAULT_PROMPT_FILE))
        );
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(
            cfg.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn from_cli_uses_inline_prompt_when_prompt_file_is_empty() {
        let cfg = config_from(&["-apiKey", "k", "-promptFile", "", "-prompt", "hello"], &[])
            .expect("config should build");
        assert_eq!(cfg.prompt_source, PromptSource::Inline("hello".to_string()));
    }

    #[test]
    fn from_cli_reads_base_url_override() {
        let cfg = config_from(
            &["-apiKey", "k"],
            &[("OPENAI_BASE_URL", "http://127.0.0.1:9999/v1/")],
        )
        .expect("config should build");
        assert_eq!(
            cfg.chat_completions_url(),
            "http://127.0.0.1:9999/v1/chat/completions"
        );
    }

    #[test]
    fn parse_api_base_url_uses_default_for_missing_or_blank_values() {
        assert_eq!(parse_api_base_url(None), DEFAULT_API_BASE_URL);
        assert_eq!(parse_api_base_url(Some("  ")), DEFAULT_API_BASE_URL);
        assert_eq!(
            parse_api_base_url(Some(" http://localhost:8080 ")),
            "http://localhost:8080"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = config_from(&["-apiKey", "sk-secret"], &[]).expect("config should build");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-secret"), "leaked key: {rendered}");
        assert!(rendered.contains("<redacted>"));
    }
}
