//! What the container can hand out, and how it builds it.
//!
//! - [`Component`]: any type that may be requested from a container.
//! - [`Autowire`]: a component with an explicit constructor manifest; the
//!   container builds it by resolving the manifest.
//! - [`Implements`]: upcasting from an implementation to an interface, used
//!   by [`Container::bind`].
//!
//! `#[derive(Autowire)]` writes the manifest from a struct's fields.
//! Trait objects and values that are only ever registered become
//! components with [`component!`](crate::component!).

use std::any::type_name;
use std::sync::Arc;

use crate::container::Container;
use crate::error::Result;
use crate::hint::{Arguments, TypeHint};

/// A type that may be requested from a [`Container`].
///
/// [`instantiate`](Component::instantiate) is the last resort of
/// resolution, used only when nothing is registered for the type. The
/// default fails with [`AutowireError::NotRegistered`], which is right for
/// trait objects and for values that must be supplied from outside.
///
/// Every [`Autowire`] type is a component.
///
/// [`AutowireError::NotRegistered`]: crate::error::AutowireError::NotRegistered
pub trait Component: 'static {
    /// Builds a new instance, resolving its dependencies from `container`.
    fn instantiate(container: &mut Container) -> Result<Arc<Self>> {
        Err(container.not_registered::<Self>())
    }
}

/// A component described by its constructor manifest.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use autowire_container::{Arguments, Autowire, Container, Parameter, Result, TypeHint};
///
/// struct Clock;
///
/// impl Autowire for Clock {
///     fn parameters() -> Vec<TypeHint> {
///         Vec::new()
///     }
///
///     fn assemble(_: Arguments) -> Result<Self> {
///         Ok(Clock)
///     }
/// }
///
/// struct Scheduler {
///     clock: Arc<Clock>,
/// }
///
/// impl Autowire for Scheduler {
///     fn parameters() -> Vec<TypeHint> {
///         vec![<Arc<Clock> as Parameter>::hint()]
///     }
///
///     fn assemble(mut arguments: Arguments) -> Result<Self> {
///         Ok(Scheduler { clock: arguments.take()? })
///     }
/// }
///
/// let mut container = Container::new();
/// let scheduler = container.construct::<Scheduler>().unwrap();
/// let clock = container.construct::<Clock>().unwrap();
/// assert!(Arc::ptr_eq(&scheduler.clock, &clock));
/// ```
pub trait Autowire: Sized + 'static {
    /// Declared types of the constructor parameters, in order.
    ///
    /// An empty list is a zero-argument constructor.
    fn parameters() -> Vec<TypeHint>;

    /// Runs the constructor with resolved arguments, in the order
    /// [`parameters`](Autowire::parameters) declared them.
    fn assemble(arguments: Arguments) -> Result<Self>;
}

impl<T: Autowire> Component for T {
    fn instantiate(container: &mut Container) -> Result<Arc<Self>> {
        let arguments = container.resolve_parameters(type_name::<T>(), T::parameters())?;
        T::assemble(arguments).map(Arc::new)
    }
}

/// `Self` can stand in wherever an `I` is requested.
///
/// Every type implements itself. Implementations for trait objects are one
/// line, or generated with `#[autowire(implements = "dyn Trait")]`:
///
/// ```
/// use std::sync::Arc;
/// use autowire_container::Implements;
///
/// trait Clock {}
/// struct SystemClock;
/// impl Clock for SystemClock {}
///
/// impl Implements<dyn Clock> for SystemClock {
///     fn upcast(self: Arc<Self>) -> Arc<dyn Clock> {
///         self
///     }
/// }
/// ```
pub trait Implements<I: ?Sized> {
    /// Converts the shared handle.
    fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T: ?Sized> Implements<T> for T {
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Declares types as components that are never autowired.
///
/// Requesting one of them without an instance or provider registered fails
/// with [`AutowireError::NotRegistered`](crate::error::AutowireError::NotRegistered).
///
/// ```
/// use autowire_container::component;
///
/// trait Clock {}
/// struct Settings {
///     retries: u8,
/// }
///
/// component!(dyn Clock, Settings);
/// ```
#[macro_export]
macro_rules! component {
    ($($ty:ty),+ $(,)?) => {
        $( impl $crate::Component for $ty {} )+
    };
}
