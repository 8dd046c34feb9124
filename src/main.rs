use std::process::ExitCode;

use risk_report::error::EXIT_INPUT;

fn main() -> ExitCode {
    match risk_report::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Format/validation failures are the tool's answer, not a crash.
            if err.exit_code() == EXIT_INPUT {
                println!("{err}");
            } else {
                eprintln!("{err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
