use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

const DEFAULT_LOG_FILTER: &str = "warn,gpt_prompt=info";
const DEFAULT_LOG_FILE_PATH: &str = "logs/gpt-prompt.log";
const DEFAULT_LOG_FILE_NAME: &str = "gpt-prompt.log";

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Flushes buffered file logs when dropped; hold it until the process exits.
pub type LogGuard = Option<WorkerGuard>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

/// Stdout is reserved for the generated text, so every sink is stderr or a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogOutput {
    Stderr,
    File,
    Both,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct LogSettings {
    format: LogFormat,
    output: LogOutput,
    file_path: PathBuf,
}

impl LogSettings {
    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            format: parse_log_format(get_var("LOG_FORMAT").as_deref()),
            output: parse_log_output(get_var("LOG_OUTPUT").as_deref()),
            file_path: parse_log_file_path(get_var("LOG_FILE_PATH").as_deref()),
        }
    }
}

fn normalized(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_ascii_lowercase())
}

fn parse_log_format(raw: Option<&str>) -> LogFormat {
    match normalized(raw).as_deref() {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

fn parse_log_output(raw: Option<&str>) -> LogOutput {
    match normalized(raw).as_deref() {
        Some("file") => LogOutput::File,
        Some("both") => LogOutput::Both,
        _ => LogOutput::Stderr,
    }
}

fn parse_log_file_path(raw: Option<&str>) -> PathBuf {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_PATH))
}

fn build_file_writer(path: &Path) -> std::io::Result<(non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE_NAME));

    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn env_filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn stderr_writer() -> BoxMakeWriter {
    BoxMakeWriter::new(std::io::stderr)
}

fn init_with_writer(format: LogFormat, writer: BoxMakeWriter) -> InitResult {
    let env_filter = env_filter_from_env();
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .try_init(),
    }
}

fn init_file_output(settings: &LogSettings) -> LogGuard {
    let include_stderr = settings.output == LogOutput::Both;

    match build_file_writer(&settings.file_path) {
        Ok((file_writer, guard)) => {
            let writer = if include_stderr {
                BoxMakeWriter::new(std::io::stderr.and(file_writer))
            } else {
                BoxMakeWriter::new(file_writer)
            };

            init_with_writer(settings.format, writer).ok().map(|()| guard)
        }
        Err(err) => {
            let (mode, fallback) = if include_stderr {
                ("both", "using stderr only")
            } else {
                ("file", "using stderr instead")
            };
            eprintln!(
                "gpt-prompt: failed to initialize LOG_OUTPUT={} at '{}': {}; {}",
                mode,
                settings.file_path.display(),
                err,
                fallback
            );
            let _ = init_with_writer(settings.format, stderr_writer());
            None
        }
    }
}

/// Installs the global subscriber from `RUST_LOG`, `LOG_FORMAT`, `LOG_OUTPUT`
/// and `LOG_FILE_PATH`. A second call leaves the first subscriber in place.
pub fn init() -> LogGuard {
    let settings = LogSettings::from_env_with(|key| env::var(key).ok());

    match settings.output {
        LogOutput::Stderr => {
            let _ = init_with_writer(settings.format, stderr_writer());
            None
        }
        LogOutput::File | LogOutput::Both => init_file_output(&settings),
    }
}
