use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

pub fn unique_temp_dir(suffix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "gpt-prompt-{suffix}-{stamp}-{}-{}",
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).expect("failed to create temp directory");
    dir
}

/// Runs the binary from `cwd` with a clean logging and credential environment.
pub fn command(cwd: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gpt-prompt"));
    cmd.args(args)
        .current_dir(cwd)
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("LOG_OUTPUT")
        .env_remove("LOG_FORMAT")
        .env_remove("LOG_FILE_PATH")
        .env("RUST_LOG", "gpt_prompt=info");
    cmd
}

pub fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run gpt-prompt binary")
}
