pub mod commands;
pub mod output;
pub mod render;

pub use commands::{run_cli, CliContext, CliError, Command};
pub use render::Renderer;
