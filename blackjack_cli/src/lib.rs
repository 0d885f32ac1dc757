//! Front ends for the blackjack table: an interactive terminal, an unattended autopilot and a
//! JSON event stream, all speaking the engine's `Console` contract.

pub mod autopilot;
pub mod json;
pub mod render;
pub mod terminal;

pub use autopilot::AutopilotConsole;
pub use json::JsonEvents;
pub use terminal::TerminalConsole;

/// Installs `env_logger`, reading the filter from `RUST_LOG` and defaulting to `warn`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
