mod cli;
mod commands;
mod infra;
pub mod interactive;
pub mod render;

use root_cause::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
