pub mod commands;
pub mod core;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod system_clock;
pub mod ui;

pub use shell::{run_cli, SCRIPT_ENV};
