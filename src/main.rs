// Hide console window on Windows release builds
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use liftoff::app::App;
use liftoff::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            // No service exists yet, so no destructors are skipped.
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Routes all log::info!() etc. to the debug log file; mirrors to stderr
    // when RUST_LOG is set. CLI --log-level beats RUST_LOG beats config.
    liftoff::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting liftoff v{}", liftoff::VERSION);

    let result = App::new(runtime_options).and_then(App::run);

    if let Err(ref e) = result {
        eprintln!("liftoff: error: {e:#}");
    }
    result
}
