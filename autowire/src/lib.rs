//! # Autowire
//!
//! A dependency injection container that builds object graphs from
//! declared constructor parameters.
//!
//! Register what cannot be built automatically (trait object bindings,
//! configuration values, objects from the outside world) and let the
//! container construct the rest on demand. Every type is built once per
//! container and shared afterwards.
//!
//! ```rust
//! use std::sync::Arc;
//! use autowire::{Autowire, Container, component};
//!
//! trait Clock {
//!     fn now(&self) -> u64;
//! }
//!
//! component!(dyn Clock);
//!
//! #[derive(Autowire)]
//! #[autowire(implements = "dyn Clock")]
//! struct FixedClock;
//!
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 { 42 }
//! }
//!
//! #[derive(Autowire)]
//! struct Scheduler {
//!     clock: Arc<dyn Clock>,
//! }
//!
//! let mut container = Container::new();
//! container.bind::<dyn Clock, FixedClock>();
//!
//! let scheduler = container.construct::<Scheduler>().unwrap();
//! assert_eq!(scheduler.clock.now(), 42);
//!
//! let now = container.call(|clock: Arc<dyn Clock>| clock.now()).unwrap();
//! assert_eq!(now, 42);
//! ```
//!
//! Parameters that are not `Arc<T>` of a component cannot be resolved.
//! Primitives, `String` and `&'static str` are accepted by the derive, and
//! asking for a type that declares one fails with
//! [`UnsupportedTypeHint`](crate::UnsupportedTypeHint):
//!
//! ```rust
//! use autowire::{Autowire, AutowireError, Container};
//!
//! #[derive(Autowire)]
//! struct Listener {
//!     port: u16,
//! }
//!
//! let mut container = Container::new();
//! let err = container.construct::<Listener>().err().unwrap();
//! assert!(matches!(err, AutowireError::UnsupportedTypeHint(_)));
//! ```
//!
//! Field types that are not [`Parameter`](crate::Parameter)s at all are
//! rejected at compile time:
//!
//! ```compile_fail
//! use autowire::Autowire;
//!
//! #[derive(Autowire)]
//! struct Buffer {
//!     bytes: Vec<u8>,
//! }
//! ```

pub use autowire_container::*;
pub use autowire_derive::*;
pub use autowire_support::*;
