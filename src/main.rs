use std::io::Write;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    nzbget_unzip::logging::init();

    let result = nzbget_unzip::run_hook(|key| std::env::var(key).ok()).await;

    // NZBGet reads our stdout until the process exits
    std::io::stdout().flush().ok();
    ExitCode::from(result.exit_code())
}
