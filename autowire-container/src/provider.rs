//! Lazy registration strategies.
//!
//! [`Container::provide`] accepts a [`Source`], one of three shapes:
//!
//! - a zero-argument closure ([`Source::factory`]),
//! - a type with the [`Provide`] capability ([`Source::provider`]),
//! - a concrete type the container should build instead
//!   ([`Source::delegate`]), which is how an interface is bound to its
//!   implementation.
//!
//! The shape is picked by the caller and normalized to a single provider
//! function when registered; resolution never looks at it again.
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use autowire_container::{Container, Provide, Source, component};
//!
//! trait Clock {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FrozenClock(u64);
//!
//! impl Clock for FrozenClock {
//!     fn now(&self) -> u64 { self.0 }
//! }
//!
//! struct EpochClock;
//!
//! impl Provide<dyn Clock> for EpochClock {
//!     fn provide() -> Arc<dyn Clock> {
//!         Arc::new(FrozenClock(0))
//!     }
//! }
//!
//! component!(dyn Clock);
//!
//! let mut container = Container::new();
//! container.provide::<dyn Clock>(Source::provider::<EpochClock>());
//! assert_eq!(container.construct::<dyn Clock>().unwrap().now(), 0);
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::component::{Component, Implements};
use crate::container::Container;
use crate::error::Result;
use crate::registry::{ProviderFn, erase};

/// Capability of manufacturing a `T` on demand.
///
/// One associated function, no receiver: the implementing type itself is
/// the provider, no instance of it is ever created.
pub trait Provide<T: ?Sized> {
    /// Produces a new instance.
    fn provide() -> Arc<T>;
}

/// How a lazily registered `T` is produced.
pub enum Source<T: ?Sized + 'static> {
    /// Call a zero-argument closure.
    Factory(Box<dyn Fn() -> Arc<T>>),
    /// Call [`Provide::provide`] of some provider type.
    Provider(fn() -> Arc<T>),
    /// Construct another type through the same container and upcast it.
    Delegate(fn(&mut Container) -> Result<Arc<T>>),
}

impl<T: ?Sized + 'static> Source<T> {
    /// Produce `T` with `factory`.
    pub fn factory(factory: impl Fn() -> Arc<T> + 'static) -> Self {
        Source::Factory(Box::new(factory))
    }

    /// Produce `T` with `P`'s [`Provide`] capability.
    pub fn provider<P: Provide<T>>() -> Self {
        Source::Provider(<P as Provide<T>>::provide)
    }

    /// Produce `T` by constructing `C` in the requesting container.
    ///
    /// `C` goes through the whole resolution order itself, so it may be
    /// registered, provided, or autowired.
    pub fn delegate<C: ?Sized + Component + Implements<T>>() -> Self {
        Source::Delegate(construct_as::<T, C>)
    }

    /// Name of the shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Source::Factory(_) => "factory",
            Source::Provider(_) => "provider",
            Source::Delegate(_) => "delegate",
        }
    }

    pub(crate) fn into_provider(self) -> ProviderFn {
        match self {
            Source::Factory(factory) => Rc::new(move |_: &mut Container| Ok(erase(factory()))),
            Source::Provider(provide) => Rc::new(move |_: &mut Container| Ok(erase(provide()))),
            Source::Delegate(construct) => {
                Rc::new(move |container: &mut Container| construct(container).map(erase))
            }
        }
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source::{}<{}>", self.shape(), std::any::type_name::<T>())
    }
}

fn construct_as<T: ?Sized + 'static, C: ?Sized + Component + Implements<T>>(
    container: &mut Container,
) -> Result<Arc<T>> {
    container.construct::<C>().map(<C as Implements<T>>::upcast)
}
