//! A sample server whose constructor takes its settings as [`Mutator`]s.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tracing::info;
use with::{
    add_with, default_then_add_with, ComposableOptions, CompositionError, Mutator, MutatorResult,
};

/// Timeout used when the caller does not provide one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);


#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ServerOptionsError {
    #[error("host is required")]
    MissingHost,

    #[error("port is required")]
    MissingPort,

    #[error("port must be between 1 and 65535, got {0}")]
    PortOutOfRange(i64),

    #[error("timeout is required")]
    MissingTimeout,
}


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerOptions {
    pub host: String,

    pub port: u16,

    pub timeout: Duration,
}

impl ComposableOptions for ServerOptions {
    fn set_defaults(&mut self) {
        self.timeout = DEFAULT_TIMEOUT;
    }

    fn validate(&self) -> MutatorResult {
        if self.host.is_empty() {
            return Err(ServerOptionsError::MissingHost.into());
        }

        if self.port == 0 {
            return Err(ServerOptionsError::MissingPort.into());
        }

        if self.timeout.is_zero() {
            return Err(ServerOptionsError::MissingTimeout.into());
        }

        Ok(())
    }
}


pub fn with_host<S>(host: S) -> Mutator<'static, ServerOptions>
where
    S: Into<String>,
{
    let host: String = host.into();

    Mutator::infallible("with_host", move |options: &mut ServerOptions| {
        options.host.clone_from(&host);
    })
}

/// Sets the port, rejecting anything outside `1..=65535` without touching the options.
pub fn with_port(port: i64) -> Mutator<'static, ServerOptions> {
    Mutator::new("with_port", move |options: &mut ServerOptions| {
        if port == 0 {
            return Err(ServerOptionsError::MissingPort.into());
        }

        options.port =
            u16::try_from(port).map_err(|_| ServerOptionsError::PortOutOfRange(port))?;

        Ok(())
    })
}

pub fn with_timeout(timeout: Duration) -> Mutator<'static, ServerOptions> {
    Mutator::infallible("with_timeout", move |options: &mut ServerOptions| {
        options.timeout = timeout;
    })
}


#[derive(Debug, PartialEq, Eq)]
pub struct Server {
    host: String,

    port: u16,

    timeout: Duration,
}

impl Server {
    /// Creates a server from [`ServerOptions`] defaults and the given mutators.
    pub fn new(mutators: &[Mutator<'_, ServerOptions>]) -> Result<Self, CompositionError> {
        let mut options = ServerOptions::default();
        default_then_add_with(&mut options, mutators)?;

        Ok(Self::from_validated_options(options))
    }

    /// Creates a server from caller-provided options, applying `mutators` on top.
    /// Defaults are not applied.
    #[allow(dead_code)]
    pub fn from_options(
        mut options: ServerOptions,
        mutators: &[Mutator<'_, ServerOptions>],
    ) -> Result<Self, CompositionError> {
        add_with(&mut options, mutators)?;

        Ok(Self::from_validated_options(options))
    }

    fn from_validated_options(options: ServerOptions) -> Self {
        Self {
            host: options.host,
            port: options.port,
            timeout: options.timeout,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn run(&self) {
        info!(
            "Server listening on {} (timeout: {:?}).",
            self.address(),
            self.timeout()
        );
        println!("server listening on {}", self.address());
    }
}


#[cfg(test)]
mod tests {
    use with::{build, compose, on_condition};

    use super::*;

    fn require_all_fields() -> Mutator<'static, ServerOptions> {
        Mutator::new("require_all_fields", |options: &mut ServerOptions| {
            options.validate()
        })
    }

    #[test]
    fn new_server_with_all_options() {
        let server = Server::new(&[
            with_host("localhost"),
            with_port(1000),
            with_timeout(Duration::from_secs(3)),
        ])
        .unwrap();

        assert_eq!(
            server,
            Server {
                host: "localhost".to_string(),
                port: 1000,
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn new_server_without_options_fails_validation() {
        let error = Server::new(&[]).unwrap_err();

        assert!(error.is_validation_failure());
        assert_eq!(
            error.inner().downcast_ref::<ServerOptionsError>(),
            Some(&ServerOptionsError::MissingHost)
        );
    }

    #[test]
    fn new_server_falls_back_to_the_default_timeout() {
        let server = Server::new(&[with_host("localhost"), with_port(8080)]).unwrap();

        assert_eq!(server.address(), "localhost:8080");
        assert_eq!(server.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn from_options_does_not_apply_defaults() {
        let options = ServerOptions {
            host: "example.com".to_string(),
            ..Default::default()
        };

        let error = Server::from_options(options, &[with_port(443)]).unwrap_err();

        assert_eq!(
            error.inner().downcast_ref::<ServerOptionsError>(),
            Some(&ServerOptionsError::MissingTimeout)
        );
    }

    #[test]
    fn build_with_every_field_set() {
        let options = build(
            ServerOptions::default(),
            &require_all_fields(),
            &[
                with_host("localhost"),
                with_port(8080),
                with_timeout(Duration::from_secs(3)),
            ],
        )
        .unwrap();

        assert_eq!(
            options,
            ServerOptions {
                host: "localhost".to_string(),
                port: 8080,
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn build_with_only_a_host_reports_the_missing_fields() {
        let failure = build(
            ServerOptions::default(),
            &require_all_fields(),
            &[with_host("localhost")],
        )
        .unwrap_err();

        assert!(failure.error().is_validation_failure());
        assert_eq!(
            failure.error().inner().downcast_ref::<ServerOptionsError>(),
            Some(&ServerOptionsError::MissingPort)
        );
        assert_eq!(
            failure.value(),
            &ServerOptions {
                host: "localhost".to_string(),
                port: 0,
                timeout: Duration::ZERO,
            }
        );
    }

    #[test]
    fn out_of_range_port_is_rejected_before_mutating() {
        let mut options = ServerOptions {
            port: 9000,
            ..Default::default()
        };

        let error = compose(&mut options, &[with_host("localhost"), with_port(-1)]).unwrap_err();

        assert_eq!(error.step(), "with_port");
        assert_eq!(
            error.inner().downcast_ref::<ServerOptionsError>(),
            Some(&ServerOptionsError::PortOutOfRange(-1))
        );
        assert_eq!(options.host, "localhost");
        assert_eq!(options.port, 9000);
    }

    #[test]
    fn port_boundaries() {
        let mut options = ServerOptions::default();

        compose(&mut options, &[with_port(65535)]).unwrap();
        assert_eq!(options.port, 65535);

        assert!(compose(&mut options, &[with_port(65536)]).is_err());
        assert!(compose(&mut options, &[with_port(0)]).is_err());
        assert_eq!(options.port, 65535);
    }

    #[test]
    fn public_flag_overrides_the_host() {
        let server = Server::new(&[
            with_host("localhost"),
            on_condition(true, vec![with_host("0.0.0.0")]),
            with_port(80),
        ])
        .unwrap();

        assert_eq!(server.address(), "0.0.0.0:80");
    }
}
