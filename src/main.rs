use std::env;
use std::io;
use std::process::ExitCode;

use gpt_prompt::error::AppError;
use gpt_prompt::logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let _log_guard = logging::init();

    let result = {
        let mut stdout = io::stdout().lock();
        gpt_prompt::run(env::args_os(), &mut stdout).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(err)) => {
            let _ = err.print();
            ExitCode::from(AppError::Usage(err).exit_code())
        }
        Err(err) => {
            let code = err.exit_code();
            error!(exit_code = code, error = %err, "gpt-prompt failed");
            eprintln!("gpt-prompt: {:#}", anyhow::Error::from(err));
            ExitCode::from(code)
        }
    }
}
