//! Binary entrypoint that launches the Swellyo API server.

use std::process::ExitCode;

use swellyo_agent::start_swellyo_agent;

/// Start the server with configuration taken from the environment.
fn main() -> ExitCode {
    start_swellyo_agent::run()
}
