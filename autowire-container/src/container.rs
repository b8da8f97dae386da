//! # Container
//!
//! Owns the instance and provider registries and resolves requested types
//! against them.
//!
//! # Resolution order
//! ```text
//! construct::<T>()
//!     │
//!     ├── instance registered? ───────────> return it
//!     │
//!     ├── provider registered? ──> invoke ─> cache ─> return
//!     │
//!     └── autowire: resolve T's parameters (recursively)
//!                   ─> assemble ─> cache ─> return
//! ```
//!
//! Whatever is produced is cached, so every type resolves to one shared
//! instance per container.
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use autowire_container::prelude::*;
//! use autowire_container::{Arguments, Autowire, Implements, Parameter, TypeHint, component};
//!
//! trait Logger {
//!     fn log(&self, msg: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//!
//! impl Logger for ConsoleLogger {
//!     fn log(&self, msg: &str) -> String { format!("[console] {msg}") }
//! }
//!
//! impl Autowire for ConsoleLogger {
//!     fn parameters() -> Vec<TypeHint> { Vec::new() }
//!     fn assemble(_: Arguments) -> Result<Self> { Ok(ConsoleLogger) }
//! }
//!
//! impl Implements<dyn Logger> for ConsoleLogger {
//!     fn upcast(self: Arc<Self>) -> Arc<dyn Logger> { self }
//! }
//!
//! component!(dyn Logger);
//!
//! struct UserService {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl Autowire for UserService {
//!     fn parameters() -> Vec<TypeHint> {
//!         vec![<Arc<dyn Logger> as Parameter>::hint()]
//!     }
//!     fn assemble(mut arguments: Arguments) -> Result<Self> {
//!         Ok(UserService { logger: arguments.take()? })
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.bind::<dyn Logger, ConsoleLogger>();
//!
//! let service = container.construct::<UserService>().expect("Failed to resolve");
//! assert_eq!(service.logger.log("hi"), "[console] hi");
//! ```
//!
//! # Cycles
//! Dependency cycles are not detected. If `A` needs `B` and `B` needs `A`
//! and neither is registered, `construct` recurses until the stack
//! overflows. Break cycles by registering one side with [`Container::add`]
//! or [`Container::provide`].

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use autowire_support::rendering::suggest_similar;
use tracing::{debug, info, instrument, trace};

use crate::component::{Component, Implements};
use crate::error::{AutowireError, NotRegisteredError, Result, UnsupportedTypeHint};
use crate::hint::{Arguments, TypeHint};
use crate::inject::Injected;
use crate::key::DependencyKey;
use crate::provider::{Provide, Source};
use crate::registry::{ProviderFn, Registry, downcast, erase};

const DEFAULT_LABEL: &str = "container";
const MAX_SUGGESTIONS: usize = 3;

// ============================================================
// ContainerBuilder
// ============================================================

/// Configures a [`Container`] before first use.
///
/// Registration works the same as on a live container. The builder also
/// names the container.
///
/// # Examples
/// ```rust,ignore
/// let container = Container::builder()
///     .label("http")
///     .add(Arc::new(Settings::from_env()))
///     .bind::<dyn Clock, SystemClock>()
///     .build();
/// ```
pub struct ContainerBuilder {
    label: String,
    registry: Registry,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            registry: Registry::new(),
        }
    }

    /// Names the container in logs and `Debug` output.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Preloads an instance. See [`Container::add`].
    pub fn add<T: ?Sized + 'static>(mut self, instance: Arc<T>) -> Self {
        let key = DependencyKey::of::<T>();
        debug!(container = %self.label, key = %key, "Registered instance");
        self.registry.insert_instance(key, erase(instance));
        self
    }

    /// Preloads a provider. See [`Container::provide`].
    pub fn provide<T: ?Sized + 'static>(mut self, source: Source<T>) -> Self {
        let key = DependencyKey::of::<T>();
        debug!(container = %self.label, key = %key, shape = source.shape(), "Registered provider");
        self.registry.insert_provider(key, source.into_provider());
        self
    }

    /// Preloads a factory closure. See [`Container::provide_with`].
    pub fn provide_with<T: ?Sized + 'static>(
        self,
        factory: impl Fn() -> Arc<T> + 'static,
    ) -> Self {
        self.provide(Source::factory(factory))
    }

    /// Preloads a [`Provide`] type. See [`Container::provide_by`].
    pub fn provide_by<T: ?Sized + 'static, P: Provide<T>>(self) -> Self {
        self.provide(Source::provider::<P>())
    }

    /// Preloads an interface binding. See [`Container::bind`].
    pub fn bind<T: ?Sized + 'static, C: ?Sized + Component + Implements<T>>(self) -> Self {
        self.provide(Source::delegate::<C>())
    }

    /// Builds the container.
    #[instrument(skip(self), name = "container_build", fields(label = %self.label))]
    pub fn build(self) -> Container {
        info!(
            instances = self.registry.instance_count(),
            providers = self.registry.provider_count(),
            "Building container"
        );

        Container {
            label: self.label,
            registry: self.registry,
            path: Vec::new(),
        }
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("label", &self.label)
            .field("registry", &self.registry)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Single-threaded dependency injection container.
///
/// Holds at most one instance per type. Instances are handed out as
/// `Arc<T>`; two resolutions of the same type from the same container
/// return pointer-equal handles.
pub struct Container {
    label: String,
    registry: Registry,
    path: Vec<DependencyKey>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            registry: Registry::new(),
            path: Vec::new(),
        }
    }

    /// Create a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Name given at build time.
    pub fn label(&self) -> &str {
        &self.label
    }

    // ── Registration ──

    /// Registers `instance` as the one `T` of this container.
    ///
    /// Overwrites an earlier instance. A provider registered for `T` stays
    /// but is never consulted while the instance is present.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use autowire_container::{Container, component};
    ///
    /// struct Settings { retries: u8 }
    /// component!(Settings);
    ///
    /// let mut container = Container::new();
    /// container.add(Arc::new(Settings { retries: 3 }));
    /// assert_eq!(container.construct::<Settings>().unwrap().retries, 3);
    /// ```
    pub fn add<T: ?Sized + 'static>(&mut self, instance: Arc<T>) -> &mut Self {
        let key = DependencyKey::of::<T>();
        debug!(container = %self.label, key = %key, "Registered instance");
        self.registry.insert_instance(key, erase(instance));
        self
    }

    /// Registers a lazy way of producing `T`.
    ///
    /// The provider runs on the first resolution of `T` only; its result is
    /// cached like any other instance.
    pub fn provide<T: ?Sized + 'static>(&mut self, source: Source<T>) -> &mut Self {
        let key = DependencyKey::of::<T>();
        debug!(container = %self.label, key = %key, shape = source.shape(), "Registered provider");
        self.registry.insert_provider(key, source.into_provider());
        self
    }

    /// Registers a zero-argument closure producing `T`.
    pub fn provide_with<T: ?Sized + 'static>(
        &mut self,
        factory: impl Fn() -> Arc<T> + 'static,
    ) -> &mut Self {
        self.provide(Source::factory(factory))
    }

    /// Registers `P`'s [`Provide`] capability as the way to produce `T`.
    pub fn provide_by<T: ?Sized + 'static, P: Provide<T>>(&mut self) -> &mut Self {
        self.provide(Source::provider::<P>())
    }

    /// Binds `T` (usually a trait object) to the implementation `C`.
    ///
    /// Resolving `T` constructs `C` through this container, so `C` is
    /// cached under its own key as well.
    pub fn bind<T: ?Sized + 'static, C: ?Sized + Component + Implements<T>>(
        &mut self,
    ) -> &mut Self {
        self.provide(Source::delegate::<C>())
    }

    /// Drops the instance registered for `T`, returning it.
    ///
    /// The next resolution of `T` runs its provider, or autowires, again.
    pub fn forget<T: ?Sized + 'static>(&mut self) -> Option<Arc<T>> {
        let key = DependencyKey::of::<T>();
        let instance = self.registry.remove_instance(&key)?;
        debug!(container = %self.label, key = %key, "Forgot instance");
        downcast::<T>(&key, &instance).ok()
    }

    /// Returns `true` if an instance of `T` is registered or cached.
    pub fn has_instance<T: ?Sized + 'static>(&self) -> bool {
        self.registry.has_instance(&DependencyKey::of::<T>())
    }

    /// Returns `true` if a provider for `T` is registered.
    pub fn has_provider<T: ?Sized + 'static>(&self) -> bool {
        self.registry.has_provider(&DependencyKey::of::<T>())
    }

    /// Number of types with an instance, a provider, or both.
    pub fn len(&self) -> usize {
        self.registry.registered_keys().len()
    }

    /// Returns `true` if nothing is registered or cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Resolution ──

    /// Returns the `T` of this container, building it if needed.
    ///
    /// Lookup order, first hit wins:
    /// 1. a registered or cached instance,
    /// 2. a registered provider (its result is cached),
    /// 3. [`Component::instantiate`], which for [`Autowire`] types resolves
    ///    every declared parameter through this method and assembles the
    ///    value (the result is cached).
    ///
    /// Nothing is cached for `T` when resolution fails.
    ///
    /// # Errors
    /// - [`AutowireError::UnsupportedTypeHint`] if a parameter anywhere in
    ///   the graph is not a resolvable `Arc<T>`
    /// - [`AutowireError::NotRegistered`] if a type that cannot be
    ///   autowired (a trait object, say) has no instance or provider
    ///
    /// Dependency cycles are not detected; see the module docs.
    ///
    /// [`Autowire`]: crate::component::Autowire
    pub fn construct<T: ?Sized + Component>(&mut self) -> Result<Arc<T>> {
        let key = DependencyKey::of::<T>();

        if let Some(instance) = self.registry.instance(&key) {
            trace!(container = %self.label, key = %key, "Instance hit");
            return downcast::<T>(&key, instance);
        }

        self.path.push(key);
        let result = match self.registry.provider(&key) {
            Some(provider) => self.construct_from_provider::<T>(key, provider),
            None => self.construct_from_manifest::<T>(key),
        };
        self.path.pop();

        result
    }

    /// Calls `target`, supplying every parameter from this container.
    ///
    /// Parameters are resolved in declaration order, exactly like
    /// constructor parameters, and `target`'s return value is passed
    /// through untouched.
    ///
    /// # Errors
    /// Same as [`construct`](Container::construct); `target` is not called
    /// if any parameter fails to resolve.
    #[instrument(skip_all, fields(container = %self.label, target = type_name::<F>()))]
    pub fn call<Args, F: Injected<Args>>(&mut self, target: F) -> Result<F::Output> {
        let arguments = self.resolve_parameters(type_name::<F>(), F::parameters())?;
        trace!(arguments = arguments.len(), "Invoking target");
        target.invoke(arguments)
    }

    /// Creates an independent container starting from copies of this
    /// one's registries.
    ///
    /// Instances already present are shared. Anything resolved or
    /// registered afterwards, on either side, stays on that side.
    #[instrument(skip(self), fields(container = %self.label))]
    pub fn scoped(&self) -> Container {
        debug!(
            instances = self.registry.instance_count(),
            providers = self.registry.provider_count(),
            "Creating scoped container"
        );

        Container {
            label: format!("{}/scope", self.label),
            registry: self.registry.clone(),
            path: Vec::new(),
        }
    }

    fn construct_from_provider<T: ?Sized + Component>(
        &mut self,
        key: DependencyKey,
        provider: ProviderFn,
    ) -> Result<Arc<T>> {
        trace!(container = %self.label, key = %key, "Invoking provider");
        let instance = provider(self)?;
        let typed = downcast::<T>(&key, &instance)?;
        self.registry.insert_instance(key, instance);
        Ok(typed)
    }

    fn construct_from_manifest<T: ?Sized + Component>(
        &mut self,
        key: DependencyKey,
    ) -> Result<Arc<T>> {
        trace!(container = %self.label, key = %key, depth = self.path.len(), "Autowiring");
        let instance = T::instantiate(self)?;
        self.registry.insert_instance(key, erase(instance.clone()));
        Ok(instance)
    }

    /// Resolves declared parameters in order.
    ///
    /// Stops at the first parameter that is not [`TypeHint::Named`];
    /// dependencies resolved before it stay cached.
    pub(crate) fn resolve_parameters(
        &mut self,
        target: &'static str,
        hints: Vec<TypeHint>,
    ) -> Result<Arguments> {
        let mut values = Vec::with_capacity(hints.len());

        for (position, hint) in hints.iter().enumerate() {
            let TypeHint::Named(dependency) = hint else {
                return Err(UnsupportedTypeHint::new(target, position, hint).into());
            };
            values.push(dependency.resolve(self)?);
        }

        Ok(Arguments::new(target, values))
    }

    pub(crate) fn not_registered<T: ?Sized + 'static>(&self) -> AutowireError {
        let requested = DependencyKey::of::<T>();

        let mut path = self.path.clone();
        if path.last() == Some(&requested) {
            path.pop();
        }

        let registered = self.registry.registered_keys();
        let names: Vec<&str> = registered.iter().map(|k| k.type_name()).collect();

        AutowireError::NotRegistered(NotRegisteredError {
            requested,
            path,
            suggestions: suggest_similar(requested.type_name(), &names, MAX_SUGGESTIONS),
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("label", &self.label)
            .field("instances", &self.registry.instance_count())
            .field("providers", &self.registry.provider_count())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder};
    pub use crate::component::{Autowire, Component, Implements};
    pub use crate::error::{AutowireError, Result};
    pub use crate::key::DependencyKey;
    pub use crate::provider::{Provide, Source};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
