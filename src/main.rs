use clap::Parser;
use miette::{Context, Result};
use tracing::{debug, info};

use crate::{
    cli::CLIArgs,
    logging::{initialize_tracing, LogFileOutput},
    server::Server,
};

mod cli;
mod logging;
mod server;


pub const LOG_FILE_NAME: &str = "with-server.log";


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let log_file_output = match cli_args.log_file_directory.as_deref() {
        Some(directory) => Some(LogFileOutput {
            level_filter: cli_args.log_file_level_filter()?,
            directory,
            file_name: LOG_FILE_NAME,
        }),
        None => None,
    };

    let logging_raii_guard = initialize_tracing(cli_args.console_level_filter()?, log_file_output)
        .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");
    debug!("Parsed arguments: {:?}", cli_args);


    let server = Server::new(&cli_args.server_mutators())
        .wrap_err("Failed to construct server from the given options.")?;

    server.run();


    drop(logging_raii_guard);
    Ok(())
}
