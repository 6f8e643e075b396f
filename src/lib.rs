//! Build configuration values out of ordered, named mutators.
//!
//! Instead of a constructor with a long list of positional parameters,
//! callers hand over any subset of [`Mutator`]s, each one a single named change
//! (`with_host`, `with_port`, ...). The functions in this crate apply them
//! to a base value, in the order given, and report which one failed.
//!
//! Your starting point should probably be [`build`].
//!
//! # Example
//! ```
//! use std::time::Duration;
//!
//! use with::{build, Mutator};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Options {
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//! }
//!
//! fn with_host(host: &str) -> Mutator<'static, Options> {
//!     let host = host.to_string();
//!     Mutator::infallible("with_host", move |options: &mut Options| {
//!         options.host = host.clone()
//!     })
//! }
//!
//! fn with_port(port: i64) -> Mutator<'static, Options> {
//!     Mutator::new("with_port", move |options: &mut Options| {
//!         options.port = u16::try_from(port)?;
//!         Ok(())
//!     })
//! }
//!
//! let require_port = Mutator::new("require_port", |options: &mut Options| {
//!     if options.port == 0 {
//!         return Err("port is required".into());
//!     }
//!     Ok(())
//! });
//!
//! let options = build(
//!     Options::default(),
//!     &require_port,
//!     &[with_host("localhost"), with_port(8080)],
//! )
//! .unwrap();
//! assert_eq!(options.port, 8080);
//!
//! let failure = build(Options::default(), &require_port, &[with_port(-1)]).unwrap_err();
//! assert_eq!(failure.to_string(), "cannot apply with_port");
//! ```
//!
//! # Internals
//! Every entry point is a thin layer over [`compose`]:
//! - [`build`] adds an explicit finalizer step and hands back the value on failure,
//! - [`on_condition`] packs a group of mutators into one that may be skipped,
//! - [`add_with`] and [`default_then_add_with`] call the optional hooks of
//!   [`ComposableOptions`] around it.

mod composition;
mod error;
mod mutator;
mod traits;

pub use composition::{add_with, build, compose, default_then_add_with, on_condition};
pub use error::{BuildFailure, CompositionError, MutatorError, MutatorResult};
pub use mutator::Mutator;
pub use traits::ComposableOptions;
