//! create-task - append formatted task lines to markdown notes

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = create_task::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
