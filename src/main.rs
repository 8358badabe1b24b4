// Entrypoint for the CLI application.
// - Keeps `main` small: initialize logging and hand control to the UI flow.
// - Returns `anyhow::Result` so setup errors print with their context.

use faceswap_cli::ui;

fn main() -> anyhow::Result<()> {
    // RUST_LOG selects diagnostics; raw service responses log at debug.
    env_logger::init();

    // Run exactly one interactive face-swap. This call blocks until the
    // remote job reaches a terminal state.
    ui::run()
}
