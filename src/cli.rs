//! Command-line interface definitions for the server binary.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;
use with::{on_condition, Mutator};

use crate::server::{with_host, with_port, with_timeout, ServerOptions};


/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "with-server",
    author,
    about = "Constructs a sample server from whichever options are given.",
    version
)]
pub struct CLIArgs {
    #[arg(long = "host", help = "Host name or address to listen on.")]
    pub host: Option<String>,

    #[arg(
        short = 'p',
        long = "port",
        allow_hyphen_values = true,
        help = "Port to listen on (1-65535)."
    )]
    pub port: Option<i64>,

    #[arg(
        long = "timeout-secs",
        help = "Connection timeout in seconds. Defaults to 30 if unspecified."
    )]
    pub timeout_secs: Option<u64>,

    #[arg(
        long = "public",
        help = "Listen on all interfaces. Takes precedence over --host."
    )]
    pub public: bool,

    #[arg(
        long = "console-log-level",
        default_value = "info",
        help = "Level filter for console output, in RUST_LOG syntax."
    )]
    pub console_log_level: String,

    /// If unspecified, logs are written to the console only.
    #[arg(
        long = "log-file-directory",
        help = "Directory to write with-server.log into."
    )]
    pub log_file_directory: Option<PathBuf>,

    #[arg(
        long = "log-file-level",
        default_value = "debug",
        help = "Level filter for log file output, in RUST_LOG syntax."
    )]
    pub log_file_level: String,
}

impl CLIArgs {
    pub fn console_level_filter(&self) -> Result<EnvFilter> {
        parse_level_filter(&self.console_log_level)
            .wrap_err("Failed to parse --console-log-level.")
    }

    pub fn log_file_level_filter(&self) -> Result<EnvFilter> {
        parse_level_filter(&self.log_file_level).wrap_err("Failed to parse --log-file-level.")
    }

    /// One mutator per server option. Options that were not given become no-ops,
    /// so the list always has the same shape.
    pub fn server_mutators(&self) -> Vec<Mutator<'static, ServerOptions>> {
        vec![
            Mutator::when_some(self.host.clone(), with_host::<String>),
            on_condition(self.public, vec![with_host("0.0.0.0")]),
            Mutator::when_some(self.port, with_port),
            Mutator::when_some(self.timeout_secs.map(Duration::from_secs), with_timeout),
        ]
    }
}


fn parse_level_filter(value: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(value)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Invalid level filter: {}", value))
}


#[cfg(test)]
mod tests {
    use with::compose;

    use super::*;

    #[test]
    fn missing_arguments_become_no_ops() {
        let cli_args = CLIArgs::parse_from(["with-server", "--port", "8080"]);
        let mutators = cli_args.server_mutators();

        let names: Vec<&str> = mutators.iter().map(Mutator::name).collect();
        assert_eq!(names, vec!["noop", "noop", "with_port", "noop"]);

        let mut options = ServerOptions::default();
        compose(&mut options, &mutators).unwrap();
        assert_eq!(
            options,
            ServerOptions {
                port: 8080,
                ..Default::default()
            }
        );
    }

    #[test]
    fn public_overrides_host() {
        let cli_args =
            CLIArgs::parse_from(["with-server", "--host", "localhost", "--public", "-p", "1"]);

        let mut options = ServerOptions::default();
        compose(&mut options, &cli_args.server_mutators()).unwrap();

        assert_eq!(options.host, "0.0.0.0");
        assert_eq!(options.port, 1);
    }

    #[test]
    fn negative_port_reaches_the_mutator() {
        let cli_args = CLIArgs::parse_from(["with-server", "--port", "-1"]);

        let mut options = ServerOptions::default();
        let error = compose(&mut options, &cli_args.server_mutators()).unwrap_err();

        assert_eq!(error.step(), "with_port");
    }

    #[test]
    fn invalid_level_filters_are_rejected() {
        let cli_args = CLIArgs::parse_from(["with-server", "--console-log-level", "with=loudest"]);

        assert!(cli_args.console_level_filter().is_err());
        assert!(cli_args.log_file_level_filter().is_ok());
    }
}
