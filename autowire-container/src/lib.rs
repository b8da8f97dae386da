//! Core container implementation for autowire.

pub mod component;
pub mod container;
pub mod error;
pub mod hint;
pub mod inject;
pub mod key;
pub mod provider;
mod registry;

pub use component::{Autowire, Component, Implements};
pub use container::{Container, ContainerBuilder, prelude};
pub use error::{AutowireError, NotRegisteredError, Result, UnsupportedTypeHint};
pub use hint::{Arguments, Dependency, Parameter, TypeHint};
pub use inject::Injected;
pub use key::DependencyKey;
pub use provider::{Provide, Source};
