use std::process::ExitCode;

use providerkit::cli::run_cli;
use providerkit::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {err:#}");
    }
    match run_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}
