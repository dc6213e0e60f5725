//! Langtrail binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match langtrail::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            langtrail::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
