use std::ffi::OsString;

use clap::Parser;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PROMPT: &str =
    "Write me a 100 word paragraph, use h1 and h2 and bold. reply in markdown format";
pub const DEFAULT_PROMPT_FILE: &str = "File";
pub const DEFAULT_MAX_TOKENS: i64 = 50;
pub const DEFAULT_SAMPLING_VALUE: f64 = 0.5;

const LONG_FLAGS: &[&str] = &[
    "apiKey",
    "model",
    "prompt",
    "promptFile",
    "maxTokens",
    "temperature",
    "frequencyPenalty",
    "presencePenalty",
];

/// Sends one chat completion request and prints the generated text.
#[derive(Parser, Debug, Clone)]
#[command(version, about, args_override_self = true)]
pub struct Cli {
    /// OpenAI API key
    #[arg(
        long = "apiKey",
        env = "OPENAI_API_KEY",
        default_value = "",
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    pub api_key: String,

    /// OpenAI model ID
    #[arg(long, default_value = DEFAULT_MODEL, allow_hyphen_values = true)]
    pub model: String,

    /// Text prompt to generate a response to
    #[arg(long, default_value = DEFAULT_PROMPT, allow_hyphen_values = true)]
    pub prompt: String,

    /// File whose contents are used as the prompt; pass an empty value to use --prompt
    #[arg(
        long = "promptFile",
        default_value = DEFAULT_PROMPT_FILE,
        allow_hyphen_values = true
    )]
    pub prompt_file: String,

    /// Maximum number of tokens to generate in the response
    #[arg(
        long = "maxTokens",
        default_value_t = DEFAULT_MAX_TOKENS,
        allow_negative_numbers = true
    )]
    pub max_tokens: i64,

    /// Sampling temperature for the model
    #[arg(long, default_value_t = DEFAULT_SAMPLING_VALUE, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Frequency penalty for the model
    #[arg(
        long = "frequencyPenalty",
        default_value_t = DEFAULT_SAMPLING_VALUE,
        allow_negative_numbers = true
    )]
    pub frequency_penalty: f64,

    /// Presence penalty for the model
    #[arg(
        long = "presencePenalty",
        default_value_t = DEFAULT_SAMPLING_VALUE,
        allow_negative_numbers = true
    )]
    pub presence_penalty: f64,
}

impl Cli {
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrites single-dash long flags (`-apiKey`, `-maxTokens=10`) to the
/// double-dash form clap expects. Flag values pass through untouched, so
/// `-prompt -model` keeps `-model` as the prompt text.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expect_value = false;
    let mut passthrough = false;

    for (idx, arg) in args.into_iter().map(Into::into).enumerate() {
        if idx == 0 || passthrough || expect_value {
            expect_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let (flag, inline_value) = match text.split_once('=') {
            Some((flag, _)) => (flag, true),
            None => (text, false),
        };
        let name = flag.trim_start_matches('-');
        let dashes = flag.len() - name.len();
        if !(1..=2).contains(&dashes) || !LONG_FLAGS.contains(&name) {
            normalized.push(arg);
            continue;
        }

        expect_value = !inline_value;
        if dashes == 1 {
            normalized.push(OsString::from(format!("-{text}")));
        } else {
            normalized.push(arg);
        }
    }

    normalized
}
